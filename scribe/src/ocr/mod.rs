//! OCR (Optical Character Recognition) Module
//!
//! Text extraction is delegated to the Tesseract command line tool, run as a
//! child process once per upload. The binary is invoked directly with an
//! argument vector, never through a shell:
//!
//! ```text
//! tesseract <image-path> - -l eng+fra
//! ```
//!
//! `-` sends the recognized text to stdout. Anything written to stderr is
//! treated as a failure of the run.
//!
//! # Configuration
//!
//! Controlled via `OcrConfig` (see `config.rs`):
//! - `binary`: path or name of the tesseract executable
//! - `timeout_secs`: how long a single run may take before it is killed
//!
//! # Usage
//!
//! ```rust,ignore
//! let engine = OcrEngine::new(&config.ocr);
//! let text = engine.recognize(artifact.path()).await?;
//! ```

mod engine;

pub use engine::OcrEngine;

use axum::{
    body::Bytes,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Tesseract language set, English plus French.
pub const LANGUAGES: &str = "eng+fra";

/// Text produced by a successful run, exactly as the engine printed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    text: Bytes,
}

impl Recognition {
    pub fn new(text: impl Into<Bytes>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl IntoResponse for Recognition {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.text,
        )
            .into_response()
    }
}
