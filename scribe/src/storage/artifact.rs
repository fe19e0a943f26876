use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// A temporary upload on local disk, deleted when the guard is released.
///
/// Call [`UploadArtifact::remove`] on every normal exit path. If the guard is
/// dropped without that (for example the request future was cancelled when
/// the client went away) the file is removed synchronously in `Drop`.
#[derive(Debug)]
pub struct UploadArtifact {
    name: String,
    path: PathBuf,
    removed: bool,
}

impl UploadArtifact {
    pub(super) fn new(name: String, path: PathBuf) -> Self {
        Self {
            name,
            path,
            removed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the file. Failures are logged, never returned.
    pub async fn remove(mut self) {
        let result = tokio::fs::remove_file(&self.path).await;
        self.removed = true;
        self.log_removal(result);
    }

    fn log_removal(&self, result: std::io::Result<()>) {
        match result {
            Ok(()) => info!(file = %self.name, "Upload deleted from local storage"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file = %self.name, "Upload already gone")
            }
            Err(e) => warn!(file = %self.name, error = %e, "Failed to delete upload"),
        }
    }
}

impl Drop for UploadArtifact {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        // Blocking unlink on purpose: a spawned task could be lost at shutdown.
        let result = std::fs::remove_file(&self.path);
        self.log_removal(result);
    }
}
