use std::sync::Arc;

use crate::config::Config;
use crate::ocr::OcrEngine;
use crate::storage::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Where uploads live while they are being recognized.
    pub store: UploadStore,
    pub engine: OcrEngine,
}

impl AppState {
    pub fn new(config: Config, store: UploadStore) -> Self {
        let engine = OcrEngine::new(&config.ocr);

        Self {
            config: Arc::new(config),
            store,
            engine,
        }
    }
}
