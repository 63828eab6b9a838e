use analyzer::AnalysisResults;
use common::{ContentHash, SubmissionStatus};
use serde::{Deserialize, Serialize};

use crate::entity::Evaluation;
use crate::error::AppError;

/// Request body for `POST /analyze`.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Source code to score.
    #[serde(default)]
    #[schema(example = "function foo() { if (x) {} }")]
    pub code: String,
    /// Caller-chosen id. Resubmitting a finished id replaces its result.
    #[serde(default)]
    #[schema(example = "sub-42")]
    pub submission_id: String,
}

/// Response body for `POST /analyze`.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[schema(example = "sub-42")]
    pub submission_id: String,
    #[schema(value_type = String)]
    pub code_hash: ContentHash,
    pub results: AnalysisResults,
    /// Always `completed`; failures are returned as errors.
    pub status: SubmissionStatus,
}

impl From<Evaluation> for AnalyzeResponse {
    fn from(evaluation: Evaluation) -> Self {
        Self {
            results: evaluation.results(),
            submission_id: evaluation.submission_id,
            code_hash: evaluation.code_hash,
            status: SubmissionStatus::Completed,
        }
    }
}

/// Validate an analyze request before anything is registered.
pub fn validate_analyze_request(req: &AnalyzeRequest, max_code_size: usize) -> Result<(), AppError> {
    if req.code.is_empty() || req.submission_id.trim().is_empty() {
        return Err(AppError::Validation(
            "Code and submissionId are required".into(),
        ));
    }

    if req.code.len() > max_code_size {
        return Err(AppError::Validation(format!(
            "Code size ({} bytes) exceeds maximum ({} bytes)",
            req.code.len(),
            max_code_size
        )));
    }

    Ok(())
}
