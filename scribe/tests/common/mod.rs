#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use tempfile::TempDir;

use scribe::api::{create_router, AppState};
use scribe::config::{Config, OcrConfig, ServerConfig, StorageConfig};
use scribe::storage::UploadStore;

/// A router wired to a throwaway upload directory and a shell-script engine.
pub struct TestApp {
    pub router: Router,
    pub upload_dir: PathBuf,
    pub config: Config,
    _tmp: TempDir,
}

impl TestApp {
    /// `engine_script` is sourced by the stub engine for every upload, with
    /// the same arguments tesseract would get.
    pub async fn new(engine_script: &str) -> Self {
        Self::with_timeout(engine_script, 5).await
    }

    pub async fn with_timeout(engine_script: &str, timeout_secs: u64) -> Self {
        let binary = stub_engine().to_string_lossy().into_owned();
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(tmp.path().join("engine.sh"), engine_script)
            .expect("Failed to write engine script");
        Self::build(tmp, binary, timeout_secs).await
    }

    pub async fn with_binary(binary: &str) -> Self {
        stub_engine();
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        Self::build(tmp, binary.to_string(), 5).await
    }

    async fn build(tmp: TempDir, binary: String, timeout_secs: u64) -> Self {
        let upload_dir = tmp.path().join("uploads");
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                max_upload_bytes: 1024 * 1024,
            },
            storage: StorageConfig {
                upload_dir: upload_dir.clone(),
            },
            ocr: OcrConfig {
                binary,
                timeout_secs,
            },
        };

        let store = UploadStore::init(&upload_dir)
            .await
            .expect("Failed to init upload store");
        let router = create_router(AppState::new(config.clone(), store));

        Self {
            router,
            upload_dir,
            config,
            _tmp: tmp,
        }
    }

    /// Marker a test script can `touch` to prove it ran.
    pub fn marker(&self, name: &str) -> PathBuf {
        self.upload_dir
            .parent()
            .expect("upload dir has a parent")
            .join(name)
    }

    pub fn uploads(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.upload_dir)
            .expect("Failed to read upload dir")
            .map(|entry| entry.expect("Bad dir entry").path())
            .collect()
    }
}

/// Path of a tesseract stand-in shared by every test in the binary.
///
/// The executable is written once, before any test spawns a process, so no
/// forked child can be holding it open for writing when it is exec'd
/// (`ETXTBSY`). Per-test behavior lives in `engine.sh` beside the upload
/// directory and is sourced, not executed.
pub fn stub_engine() -> &'static Path {
    static STUB: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_, path) = STUB.get_or_init(|| {
        let dir = tempfile::tempdir().expect("Failed to create stub dir");
        let path = dir.path().join("tesseract");
        std::fs::write(&path, STUB_SCRIPT).expect("Failed to write stub");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod stub");
        (dir, path)
    });
    path
}

const STUB_SCRIPT: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    echo "tesseract 5.3.4 (stub)"
    exit 0
fi
. "$(dirname "$1")/../engine.sh"
"#;

pub fn upload(content_type: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/");
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    builder.body(body.into()).expect("Failed to build request")
}

pub async fn read_body(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
