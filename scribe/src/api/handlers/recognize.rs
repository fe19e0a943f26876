//! Upload-and-recognize handler.
//!
//! The request body is the raw image. It is streamed to a fresh file in the
//! upload directory, Tesseract is run against that file, and the file is
//! removed again before the response goes out.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap},
};
use futures::TryStreamExt;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::io::StreamReader;
use tracing::{error, info, warn};

use crate::api::AppState;
use crate::error::{Result, ScribeError};
use crate::models::ImageKind;
use crate::ocr::Recognition;

/// `POST /`
///
/// Responds `200` with the recognized text, `400` when the `Content-Type` is
/// not JPEG or PNG, and `500` when the upload could not be saved or the
/// engine failed or wrote anything to stderr. A body larger than
/// `max_upload_bytes` counts as a failed upload.
pub async fn recognize(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Recognition> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let Some(kind) = ImageKind::from_content_type(content_type) else {
        warn!(content_type = ?content_type, "Rejected upload with unsupported media type");
        return Err(ScribeError::UnsupportedMediaType(
            content_type.map(str::to_string),
        ));
    };

    let (artifact, file) = state.store.create(kind).await?;

    let limit = state.config.server.max_upload_bytes as u64;
    match persist(body, file, limit).await {
        Ok(bytes) => info!(file = %artifact.name(), bytes, "File saved"),
        Err(e) => {
            error!(file = %artifact.name(), error = %e, "File upload error");
            artifact.remove().await;
            return Err(ScribeError::Upload(e.to_string()));
        }
    }

    let result = state.engine.recognize(artifact.path()).await;
    artifact.remove().await;

    match &result {
        Ok(recognition) => info!(bytes = recognition.len(), "Recognition succeeded"),
        Err(e) => error!(error = %e, "Recognition failed"),
    }
    result
}

/// Copies the request body into `file`, draining the body only as fast as
/// the file accepts writes. The file is flushed and closed before returning.
///
/// Fails once more than `limit` bytes have arrived.
async fn persist(body: Body, mut file: File, limit: u64) -> std::io::Result<u64> {
    let stream = body.into_data_stream().map_err(std::io::Error::other);
    let mut reader = StreamReader::new(stream).take(limit + 1);

    let written = tokio::io::copy(&mut reader, &mut file).await?;
    if written > limit {
        return Err(std::io::Error::other(format!(
            "upload exceeds {limit} bytes"
        )));
    }
    file.flush().await?;
    Ok(written)
}
