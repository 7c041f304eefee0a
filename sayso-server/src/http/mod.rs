//! HTTP server module

mod api;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::AppState;

pub use api::{ErrorResponse, HealthResponse, UploadResponse};

/// Uploaded audio clips are short, but raw PCM adds up; the axum default
/// of 2 MiB is too small for a sentence of 16 kHz wav.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/assess", post(api::assess))
        .route("/api/result/:id", get(api::get_result))
        .route("/api/assessments/:user_id", get(api::get_user_dashboard))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
