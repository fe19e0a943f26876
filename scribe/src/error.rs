use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body sent for uploads whose `Content-Type` is neither JPEG nor PNG.
pub const UNSUPPORTED_MEDIA_MESSAGE: &str = "Only JPG and PNG files are allowed.";

/// Body sent when the request body could not be written to disk.
pub const UPLOAD_FAILED_MESSAGE: &str = "File upload failed.";

#[derive(Error, Debug)]
pub enum ScribeError {
    #[error("Unsupported media type: {0:?}")]
    UnsupportedMediaType(Option<String>),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("OCR engine error: {0}")]
    Engine(String),

    /// Anything the engine printed on stderr, verbatim.
    #[error("OCR engine reported: {0}")]
    EngineReported(String),

    #[error("OCR engine timed out after {0} seconds")]
    EngineTimeout(u64),
}

impl IntoResponse for ScribeError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ScribeError::UnsupportedMediaType(_) => {
                (StatusCode::BAD_REQUEST, UNSUPPORTED_MEDIA_MESSAGE.to_string())
            }
            ScribeError::Upload(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UPLOAD_FAILED_MESSAGE.to_string(),
            ),
            ScribeError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            ScribeError::Engine(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            ScribeError::EngineReported(stderr) => {
                (StatusCode::INTERNAL_SERVER_ERROR, stderr.clone())
            }
            ScribeError::EngineTimeout(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, ScribeError>;
