//! Declarative risk and mitigation pattern tables.
//!
//! Adding a pattern means adding a row here; the security scorer only walks
//! the tables.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Whether a pattern lowers or raises the security score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Penalty,
    Bonus,
}

/// One row of a pattern table.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    /// Stable identifier reported in findings.
    pub name: &'static str,
    /// Regex counted with non-overlapping matches.
    pub pattern: &'static str,
    /// Points per counted occurrence.
    pub weight: u32,
    /// Occurrences beyond this are ignored.
    pub cap: u32,
    pub kind: RuleKind,
}

impl PatternRule {
    const fn penalty(name: &'static str, pattern: &'static str, weight: u32) -> Self {
        Self {
            name,
            pattern,
            weight,
            cap: PENALTY_CAP,
            kind: RuleKind::Penalty,
        }
    }

    const fn bonus(name: &'static str, pattern: &'static str, weight: u32) -> Self {
        Self {
            name,
            pattern,
            weight,
            cap: BONUS_CAP,
            kind: RuleKind::Bonus,
        }
    }

    /// Points this rule contributes for `occurrences` matches.
    pub fn applied_points(&self, occurrences: usize) -> u32 {
        let counted = u32::try_from(occurrences).unwrap_or(u32::MAX).min(self.cap);
        self.weight * counted
    }
}

pub const PENALTY_CAP: u32 = 3;
pub const BONUS_CAP: u32 = 2;

pub const RISK_PATTERNS: &[PatternRule] = &[
    PatternRule::penalty("tx_origin", r"tx\.origin", 20),
    PatternRule::penalty("low_level_call", r"\.call\(", 15),
    PatternRule::penalty("delegatecall", r"delegatecall", 25),
    PatternRule::penalty("timestamp_dependency", r"block\.timestamp", 10),
    PatternRule::penalty("block_number_dependency", r"block\.number", 8),
    PatternRule::penalty("selfdestruct", r"selfdestruct", 30),
];

pub const MITIGATING_PATTERNS: &[PatternRule] = &[
    PatternRule::bonus("input_validation", r"require\(", 5),
    PatternRule::bonus("access_modifier", r"modifier\s+[0-9A-Za-z_]+", 10),
    PatternRule::bonus("event_logging", r"event\s+[0-9A-Za-z_]+", 8),
    PatternRule::bonus("state_mutability", r"(?-u:\b)(?:pure|view)(?-u:\b)", 5),
];

/// A table row paired with its compiled regex.
pub(crate) struct CompiledRule {
    pub rule: PatternRule,
    pub regex: Regex,
}

impl CompiledRule {
    pub fn occurrences(&self, code: &str) -> usize {
        self.regex.find_iter(code).count()
    }
}

/// Both tables, compiled once, penalties first.
pub(crate) static COMPILED_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    RISK_PATTERNS
        .iter()
        .chain(MITIGATING_PATTERNS)
        .map(|rule| CompiledRule {
            rule: *rule,
            regex: Regex::new(rule.pattern).expect("pattern table holds valid regexes"),
        })
        .collect()
});
