use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a submission during the analysis lifecycle.
///
/// A single attempt moves `Pending -> Analyzing -> Completed`, or ends in
/// `Failed` from either in-flight state.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Accepted and hashed, analysis not yet started.
    #[default]
    Pending,
    /// Extraction and scoring in progress.
    Analyzing,
    /// Evaluation stored.
    Completed,
    /// Analysis faulted or timed out. No evaluation exists.
    Failed,
}

impl SubmissionStatus {
    /// Returns true if an analysis attempt is still running for this submission.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::Analyzing)
    }

    /// Whether `next` is a legal forward step from this status.
    pub fn can_transition_to(&self, next: SubmissionStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Analyzing)
                | (Self::Analyzing, Self::Completed)
                | (Self::Pending | Self::Analyzing, Self::Failed)
        )
    }

    /// All possible status values.
    pub const ALL: &'static [SubmissionStatus] =
        &[Self::Pending, Self::Analyzing, Self::Completed, Self::Failed];

    /// Returns the wire representation (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Analyzing => "analyzing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values: {}",
            self.invalid,
            SubmissionStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for SubmissionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubmissionStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError {
                invalid: s.to_string(),
            })
    }
}
