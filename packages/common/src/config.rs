use std::time::Duration;

use serde::Deserialize;

/// App-level analysis pipeline configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisAppConfig {
    /// Artificial processing delay before scoring, in milliseconds. Default: 1000.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Upper bound on delay plus scoring, in milliseconds. Default: 10000.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum accepted code size in bytes. Default: 10 MiB.
    #[serde(default = "default_max_code_size")]
    pub max_code_size: usize,
}

fn default_delay_ms() -> u64 {
    1000
}
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_max_code_size() -> usize {
    10 * 1024 * 1024
}

impl AnalysisAppConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for AnalysisAppConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            timeout_ms: default_timeout_ms(),
            max_code_size: default_max_code_size(),
        }
    }
}
