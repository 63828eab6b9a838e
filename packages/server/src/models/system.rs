use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::registry::RegistryStats;

/// Liveness probe response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: &'static str,
    #[schema(example = "2025-10-01T14:30:00Z")]
    pub timestamp: DateTime<Utc>,
}

/// Registry counters.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[schema(example = 10)]
    pub total_submissions: usize,
    #[schema(example = 7)]
    pub completed_analyses: usize,
    /// Everything not completed, failed submissions included.
    #[schema(example = 3)]
    pub pending_analyses: usize,
    #[schema(example = 1)]
    pub failed_analyses: usize,
}

impl From<RegistryStats> for StatsResponse {
    fn from(stats: RegistryStats) -> Self {
        Self {
            total_submissions: stats.total,
            completed_analyses: stats.completed,
            pending_analyses: stats.pending,
            failed_analyses: stats.failed,
        }
    }
}
