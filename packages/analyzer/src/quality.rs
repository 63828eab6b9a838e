use std::sync::LazyLock;

use regex::Regex;

use crate::metrics::CodeMetrics;
use crate::score::Score;

static LOWER_CAMEL_FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function\s+[a-z][a-zA-Z0-9]*").expect("valid regex"));

const BASELINE: f64 = 50.0;
const MAX_COMMENT_POINTS: f64 = 20.0;
const LICENSE_POINTS: f64 = 10.0;
const DOC_TAG_POINTS: f64 = 15.0;
const NAMING_POINTS: f64 = 10.0;
const EVENT_POINTS: f64 = 10.0;
const SHORT_LINE_POINTS: f64 = 5.0;
const SHORT_LINE_LIMIT: usize = 80;

const LICENSE_MARKER: &str = "SPDX-License-Identifier";
const DOC_TAGS: &[&str] = &["@dev", "@param", "@return"];

/// Documentation and readability signals found in a code text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualitySignals {
    pub total_lines: usize,
    pub comment_lines: usize,
    pub has_license: bool,
    pub has_doc_tags: bool,
    pub lower_camel_functions: bool,
    pub has_events: bool,
    pub short_lines: bool,
}

impl QualitySignals {
    pub fn collect(code: &str, metrics: &CodeMetrics) -> Self {
        let mut total_lines = 0usize;
        let mut comment_lines = 0usize;
        let mut total_chars = 0usize;
        for line in code.split('\n') {
            total_lines += 1;
            total_chars += line.chars().count();
            if line.trim().starts_with("//") {
                comment_lines += 1;
            }
        }

        Self {
            total_lines,
            comment_lines,
            has_license: code.contains(LICENSE_MARKER),
            has_doc_tags: DOC_TAGS.iter().any(|tag| code.contains(tag)),
            lower_camel_functions: LOWER_CAMEL_FUNCTION_RE.is_match(code),
            has_events: metrics.events > 0,
            short_lines: total_chars < SHORT_LINE_LIMIT.saturating_mul(total_lines),
        }
    }

    /// Comment-to-line ratio in points, capped.
    fn comment_points(&self) -> f64 {
        let ratio = self.comment_lines as f64 / self.total_lines.max(1) as f64;
        (ratio * 100.0).min(MAX_COMMENT_POINTS)
    }

    pub fn score(&self) -> Score {
        let flags = [
            (self.has_license, LICENSE_POINTS),
            (self.has_doc_tags, DOC_TAG_POINTS),
            (self.lower_camel_functions, NAMING_POINTS),
            (self.has_events, EVENT_POINTS),
            (self.short_lines, SHORT_LINE_POINTS),
        ];
        let bonus: f64 = flags
            .iter()
            .filter(|(present, _)| *present)
            .map(|(_, points)| points)
            .sum();

        Score::rounded(BASELINE + self.comment_points() + bonus)
    }
}

pub fn quality_score(code: &str, metrics: &CodeMetrics) -> Score {
    QualitySignals::collect(code, metrics).score()
}
