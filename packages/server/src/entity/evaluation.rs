use analyzer::{AnalysisResults, CodeDetail, Finding, Score};
use chrono::{DateTime, Utc};
use common::ContentHash;
use serde::{Deserialize, Serialize};

/// Immutable scoring result of a completed submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    #[schema(example = "sub-42")]
    pub submission_id: String,
    #[schema(value_type = String)]
    pub code_hash: ContentHash,
    pub complexity: Score,
    pub security: Score,
    pub quality: Score,
    pub final_score: Score,
    pub detail: CodeDetail,
    pub findings: Vec<Finding>,
    #[schema(example = "2025-10-01T14:30:01Z")]
    pub completed_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn new(submission_id: String, code_hash: ContentHash, results: AnalysisResults) -> Self {
        Self {
            submission_id,
            code_hash,
            complexity: results.complexity,
            security: results.security,
            quality: results.quality,
            final_score: results.final_score,
            detail: results.analysis,
            findings: results.findings,
            completed_at: Utc::now(),
        }
    }

    /// The scores in the shape `POST /analyze` returns them.
    pub fn results(&self) -> AnalysisResults {
        AnalysisResults {
            complexity: self.complexity,
            security: self.security,
            quality: self.quality,
            final_score: self.final_score,
            analysis: self.detail,
            findings: self.findings.clone(),
        }
    }
}
