use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::models::system::{HealthResponse, StatsResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    operation_id = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now(),
    })
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "System",
    operation_id = "stats",
    summary = "Submission counters",
    description = "`pendingAnalyses` is every submission without a completed evaluation, failed ones included.",
    responses(
        (status = 200, description = "Counters", body = StatsResponse),
    ),
)]
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.registry.stats()))
}
