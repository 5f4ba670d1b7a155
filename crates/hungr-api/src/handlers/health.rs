//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn liveness() -> &'static str {
    "OK"
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.stores.health_check().await.unwrap_or(false);
    let storage = state.storage.health_check().await;

    let status = if database && storage { "ok" } else { "degraded" };
    if status != "ok" {
        tracing::warn!(database, storage, "Health check degraded");
    }

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
