use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::entity::Submission;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Get a submission and its lifecycle status.
#[utoipa::path(
    get,
    path = "/submission/{submission_id}",
    tag = "Submissions",
    operation_id = "getSubmission",
    summary = "Get submission status",
    description = "Returns the submission record, including `failure` when the last attempt failed.",
    params(
        ("submission_id" = String, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission", body = Submission),
        (status = 404, description = "Unknown submission (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Result<Json<Submission>, AppError> {
    Ok(Json(state.registry.get(&submission_id)?))
}
