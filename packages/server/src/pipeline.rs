use std::sync::Arc;

use analyzer::AnalysisResults;
use common::AnalysisAppConfig;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::entity::Evaluation;
use crate::registry::{RegistryError, SubmissionRegistry, Ticket};

/// Scores code text. Runs on the blocking pool, so it may be CPU-heavy.
pub trait CodeScorer: Send + Sync + 'static {
    fn score(&self, code: &str) -> AnalysisResults;
}

/// The pattern-based scorer from the `analyzer` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternScorer;

impl CodeScorer for PatternScorer {
    fn score(&self, code: &str) -> AnalysisResults {
        analyzer::analyze(code)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis timed out after {0} ms")]
    TimedOut(u64),
    #[error("analysis crashed: {0}")]
    Crashed(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Run one attempt on its own task.
///
/// The attempt finishes (completed or failed) even if the caller stops
/// waiting for the handle.
pub fn spawn_analysis(
    registry: Arc<SubmissionRegistry>,
    scorer: Arc<dyn CodeScorer>,
    config: AnalysisAppConfig,
    ticket: Ticket,
    code: String,
) -> JoinHandle<Result<Evaluation, AnalysisError>> {
    tokio::spawn(run_analysis(registry, scorer, config, ticket, code))
}

#[instrument(
    skip_all,
    fields(submission_id = %ticket.id(), attempt = ticket.attempt, code_hash = %ticket.submission.code_hash.short())
)]
async fn run_analysis(
    registry: Arc<SubmissionRegistry>,
    scorer: Arc<dyn CodeScorer>,
    config: AnalysisAppConfig,
    ticket: Ticket,
    code: String,
) -> Result<Evaluation, AnalysisError> {
    registry.start(&ticket)?;
    info!("Starting analysis");

    let delay = config.delay();
    let scoring = async move {
        // Placeholder for heavier analysis; suspends without holding any lock.
        tokio::time::sleep(delay).await;
        tokio::task::spawn_blocking(move || scorer.score(&code)).await
    };

    let outcome = match tokio::time::timeout(config.timeout(), scoring).await {
        Ok(Ok(results)) => Ok(results),
        Ok(Err(join_err)) => Err(AnalysisError::Crashed(join_err.to_string())),
        Err(_) => Err(AnalysisError::TimedOut(config.timeout_ms)),
    };

    match outcome {
        Ok(results) => {
            let evaluation = registry.complete(&ticket, results)?;
            info!(
                complexity = evaluation.complexity.value(),
                security = evaluation.security.value(),
                quality = evaluation.quality.value(),
                final_score = evaluation.final_score.value(),
                "Analysis completed"
            );
            Ok(evaluation)
        }
        Err(err) => {
            error!(error = %err, "Analysis failed");
            if let Err(mark_err) = registry.fail(&ticket, err.to_string()) {
                warn!(error = %mark_err, "Could not mark submission as failed");
            }
            Err(err)
        }
    }
}
