use chrono::{DateTime, Utc};
use common::{ContentHash, SubmissionStatus};
use serde::{Deserialize, Serialize};

/// A code artifact registered under a client-chosen id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[schema(example = "sub-42")]
    pub id: String,
    /// Lowercase hex SHA-256 of the submitted code.
    #[schema(
        value_type = String,
        example = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    )]
    pub code_hash: ContentHash,
    #[schema(example = "2025-10-01T14:30:00Z")]
    pub received_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    /// Why the last attempt failed. Present only when `status` is `failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "analysis timed out after 10000 ms")]
    pub failure: Option<String>,
}

impl Submission {
    pub fn pending(id: String, code_hash: ContentHash) -> Self {
        Self {
            id,
            code_hash,
            received_at: Utc::now(),
            status: SubmissionStatus::Pending,
            failure: None,
        }
    }
}
