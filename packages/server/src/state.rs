use std::sync::Arc;

use crate::config::AppConfig;
use crate::pipeline::{CodeScorer, PatternScorer};
use crate::registry::SubmissionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SubmissionRegistry>,
    pub scorer: Arc<dyn CodeScorer>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_scorer(config, Arc::new(PatternScorer))
    }

    pub fn with_scorer(config: AppConfig, scorer: Arc<dyn CodeScorer>) -> Self {
        Self {
            registry: Arc::new(SubmissionRegistry::new()),
            scorer,
            config,
        }
    }
}
