//! Health/status handler.

use axum::{Json, extract::State};

use crate::AppState;
use crate::types::HealthResponse;

/// Liveness probe with index counters.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.index.stats();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documents: stats.document_count,
        chunks: stats.chunk_count,
    })
}
