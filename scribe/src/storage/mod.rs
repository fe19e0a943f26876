//! Local storage for uploaded images.
//!
//! Each request gets its own file in the upload directory, named from the
//! current time in milliseconds plus a random suffix so concurrent uploads in
//! the same millisecond never share a path. Files only live as long as the
//! request that created them; see [`UploadArtifact`].

mod artifact;

pub use artifact::UploadArtifact;

use std::path::{Path, PathBuf};

use chrono::Utc;
use nanoid::nanoid;
use tokio::fs::{File, OpenOptions};
use tracing::info;

use crate::error::{Result, ScribeError};
use crate::models::ImageKind;

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Makes sure the upload directory exists. Run once before serving.
    pub async fn init(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            ScribeError::Storage(format!(
                "Failed to create upload directory {}: {e}",
                dir.display()
            ))
        })?;
        info!(dir = %dir.display(), "Upload directory ready");
        Ok(Self { dir })
    }

    #[cfg(test)]
    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    /// Opens a fresh, uniquely named file for an incoming upload.
    pub async fn create(&self, kind: ImageKind) -> Result<(UploadArtifact, File)> {
        let name = artifact_name(kind);
        let path = self.dir.join(&name);

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                ScribeError::Storage(format!("Failed to create {}: {e}", path.display()))
            })?;

        Ok((UploadArtifact::new(name, path), file))
    }
}

fn artifact_name(kind: ImageKind) -> String {
    format!(
        "{}-{}.{}",
        Utc::now().timestamp_millis(),
        nanoid!(10),
        kind.extension()
    )
}
