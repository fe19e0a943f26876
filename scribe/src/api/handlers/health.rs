use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::AppState;
use crate::ocr::LANGUAGES;

#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub engine: EngineStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub binary: String,
    pub languages: String,
    pub available: bool,
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    let available = state.engine.is_available().await;

    Json(HealthData {
        status: if available { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: EngineStatus {
            binary: state.engine.binary().to_string(),
            languages: LANGUAGES.to_string(),
            available,
        },
    })
}
