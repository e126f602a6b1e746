//! Router configuration for the volstore API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_file, get_config, health_check, list_files, service_info, upload_file, AppState,
};
use super::middleware::create_cors_layer;

/// Slack on top of the configured upload limit so multipart framing does
/// not push a maximum-size file over the request body cap. Oversized
/// uploads are rejected by the file service with 413.
const BODY_LIMIT_OVERHEAD: usize = 64 * 1024;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let max_body = app_state.config.max_file_size_bytes() as usize + BODY_LIMIT_OVERHEAD;

    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/config", get(get_config))
        .route("/upload", post(upload_file))
        .route("/files", get(list_files))
        .route("/files/:filename", delete(delete_file))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(DefaultBodyLimit::max(max_body)),
        )
        .with_state(app_state)
}
