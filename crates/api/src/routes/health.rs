use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when layout storage is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    /// `memory`, `file`, or `postgres`.
    pub layout_backend: &'static str,
    pub layout_store_healthy: bool,
    pub ws_connections: usize,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let layout_store_healthy = match state.layouts.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Layout storage health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if layout_store_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        layout_backend: state.layouts.backend_name(),
        layout_store_healthy,
        ws_connections: state.ws_manager.connection_count().await,
    })
}

/// Mounted at the root, not under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
