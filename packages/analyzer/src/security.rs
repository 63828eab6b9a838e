use serde::{Deserialize, Serialize};

use crate::patterns::{COMPILED_RULES, RuleKind};
use crate::score::Score;

const BASELINE: i64 = 100;

/// A pattern that matched at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    #[schema(example = "selfdestruct")]
    pub pattern: String,
    pub kind: RuleKind,
    /// Raw match count, before capping.
    #[schema(example = 5)]
    pub occurrences: usize,
    /// Points actually applied after capping.
    #[schema(example = 90)]
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityReport {
    pub score: Score,
    pub findings: Vec<Finding>,
}

/// Scan `code` against both pattern tables.
///
/// Penalties and bonuses are independent: a contract can trip every risk
/// pattern and still claw points back through guards and events.
pub fn security_report(code: &str) -> SecurityReport {
    let mut total = BASELINE;
    let mut findings = Vec::new();

    for compiled in COMPILED_RULES.iter() {
        let occurrences = compiled.occurrences(code);
        if occurrences == 0 {
            continue;
        }

        let points = compiled.rule.applied_points(occurrences);
        match compiled.rule.kind {
            RuleKind::Penalty => total -= i64::from(points),
            RuleKind::Bonus => total += i64::from(points),
        }

        findings.push(Finding {
            pattern: compiled.rule.name.to_string(),
            kind: compiled.rule.kind,
            occurrences,
            points,
        });
    }

    SecurityReport {
        score: Score::clamped(total),
        findings,
    }
}
