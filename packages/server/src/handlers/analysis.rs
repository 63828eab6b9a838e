use axum::Json;
use axum::extract::{Path, State};
use tracing::{info, instrument};

use crate::entity::Evaluation;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::ValidJson;
use crate::models::analysis::{AnalyzeRequest, AnalyzeResponse, validate_analyze_request};
use crate::pipeline::spawn_analysis;
use crate::state::AppState;

/// Submit code and wait for its scores.
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "Analysis",
    operation_id = "analyzeCode",
    summary = "Score a code submission",
    description = "Registers the code under `submissionId`, scores it and returns the evaluation. \
        Resubmitting an id whose previous analysis has finished replaces the old result.",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis completed", body = AnalyzeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Same id still being analyzed (CONFLICT)", body = ErrorBody),
        (status = 500, description = "Scoring failed or timed out (ANALYSIS_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(submission_id = %payload.submission_id))]
pub async fn analyze(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    validate_analyze_request(&payload, state.config.analysis.max_code_size)?;

    let ticket = state
        .registry
        .submit(&payload.submission_id, &payload.code)?;

    info!(
        attempt = ticket.attempt,
        code_hash = %ticket.submission.code_hash.short(),
        bytes = payload.code.len(),
        "Submission registered"
    );

    let evaluation = spawn_analysis(
        state.registry.clone(),
        state.scorer.clone(),
        state.config.analysis.clone(),
        ticket,
        payload.code,
    )
    .await
    .map_err(|e| AppError::Internal(format!("Analysis task join error: {e}")))??;

    Ok(Json(AnalyzeResponse::from(evaluation)))
}

/// Get the evaluation of a completed submission.
#[utoipa::path(
    get,
    path = "/analysis/{submission_id}",
    tag = "Analysis",
    operation_id = "getAnalysis",
    summary = "Get an evaluation",
    description = "Returns the stored evaluation. Submissions that are unknown, still in progress or failed have none.",
    params(
        ("submission_id" = String, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Evaluation", body = Evaluation),
        (status = 404, description = "No evaluation for this id (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Result<Json<Evaluation>, AppError> {
    Ok(Json(state.registry.get_evaluation(&submission_id)?))
}
