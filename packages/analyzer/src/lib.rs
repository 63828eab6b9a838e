//! Deterministic code scoring.
//!
//! Three independent axes (structural complexity, security-pattern risk,
//! documentation quality) combined into one weighted final score. Pure and
//! stateless: the same text always scores the same.

pub mod aggregate;
pub mod complexity;
pub mod metrics;
pub mod patterns;
pub mod quality;
pub mod score;
pub mod security;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub use aggregate::final_score;
pub use metrics::CodeMetrics;
pub use patterns::{PatternRule, RuleKind};
pub use score::Score;
pub use security::Finding;

/// Structural detail reported alongside the scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeDetail {
    #[schema(example = 42)]
    pub lines_of_code: usize,
    #[schema(example = 3)]
    pub functions: usize,
    #[schema(example = 1)]
    pub events: usize,
    #[schema(example = 1)]
    pub modifiers: usize,
}

impl From<&CodeMetrics> for CodeDetail {
    fn from(m: &CodeMetrics) -> Self {
        Self {
            lines_of_code: m.lines_of_code,
            functions: m.functions,
            events: m.events,
            modifiers: m.modifiers,
        }
    }
}

/// Scores for one code text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResults {
    pub complexity: Score,
    pub security: Score,
    pub quality: Score,
    pub final_score: Score,
    pub analysis: CodeDetail,
    /// Security patterns that matched, penalties first.
    pub findings: Vec<Finding>,
}

/// Score a code text on all three axes.
#[instrument(skip(code), fields(bytes = code.len()))]
pub fn analyze(code: &str) -> AnalysisResults {
    let metrics = CodeMetrics::extract(code);

    let complexity = complexity::complexity_score(&metrics);
    let security = security::security_report(code);
    let quality = quality::quality_score(code, &metrics);
    let final_score = final_score(security.score, complexity, quality);

    debug!(
        complexity = complexity.value(),
        security = security.score.value(),
        quality = quality.value(),
        final_score = final_score.value(),
        findings = security.findings.len(),
        "Scoring finished"
    );

    AnalysisResults {
        complexity,
        security: security.score,
        quality,
        final_score,
        analysis: CodeDetail::from(&metrics),
        findings: security.findings,
    }
}
