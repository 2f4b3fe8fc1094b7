use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use sentiment_application::{AudioAnalysisUseCase, DocumentAnalysisUseCase};
use sentiment_configuration::UploadConfig;

pub mod error;
pub mod handlers;
mod upload;

pub use error::{error_mapper, HttpError};
pub use handlers::*;

#[derive(Clone)]
pub struct AppState {
    pub document: Arc<dyn DocumentAnalysisUseCase>,
    pub audio: Arc<dyn AudioAnalysisUseCase>,
    pub uploads: UploadConfig,
}

pub fn create_router(state: AppState) -> Router {
    // multipart framing adds overhead on top of the raw document cap
    let body_limit = DefaultBodyLimit::max(state.uploads.max_document_size_bytes + 1024 * 1024);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/print-media/analyze", post(analyze_document))
        .route("/audio/analyze", post(analyze_audio))
        .layer(body_limit)
        .with_state(state)
}
