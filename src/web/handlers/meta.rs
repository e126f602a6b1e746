//! Service metadata handlers: index, health check, configuration.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::web::dto::{
    ConfigResponse, EndpointIndex, HealthResponse, ServiceInfoResponse, VolumeInfo,
};
use crate::web::handlers::AppState;

/// GET / - Service index with the endpoint map.
pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: state.config.app.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: EndpointIndex {
            health: "/health",
            upload: "/upload",
            files: "/files",
            config: "/config",
        },
    })
}

/// GET /health - Health check.
///
/// Reports whether the volume root is currently readable, not merely
/// that configuration was loaded.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.volume.health().await;

    Json(HealthResponse {
        status: if health.reachable {
            "healthy"
        } else {
            "degraded"
        },
        volume_path: state.volume.root().display().to_string(),
        reachable: health.reachable,
    })
}

/// GET /config - Current volume configuration.
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    let volume = &state.config.volume;

    Json(ConfigResponse {
        volume: VolumeInfo {
            catalog: volume.catalog.clone(),
            schema: volume.schema.clone(),
            volume_name: volume.volume_name.clone(),
            path: volume.path.clone(),
        },
        max_file_size_mb: state.config.app.max_file_size_mb,
    })
}
