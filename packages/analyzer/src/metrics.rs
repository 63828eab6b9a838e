//! Structural counts extracted from raw code text.
//!
//! This is plain pattern counting, not parsing: any text, including text that
//! is not code at all, yields a (possibly all-zero) set of counts.
//!
//! Word characters are ASCII only (`[0-9A-Za-z_]`), so a keyword touching a
//! non-ASCII letter still counts and a non-ASCII name is not a name.

use std::sync::LazyLock;

use regex::Regex;

static FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function\s+[0-9A-Za-z_]+").expect("valid regex"));
static CONDITIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)(?:if|while|for|require)(?-u:\b)").expect("valid regex"));
static LOOP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)(?:for|while)(?-u:\b)").expect("valid regex"));
static EVENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"event\s+[0-9A-Za-z_]+").expect("valid regex"));
static MODIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"modifier\s+[0-9A-Za-z_]+").expect("valid regex"));

/// Raw structural counts for one code text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeMetrics {
    /// Lines with at least one non-whitespace character.
    pub lines_of_code: usize,
    /// `function <name>` occurrences.
    pub functions: usize,
    /// Guard keywords: `if`, `while`, `for`, `require`.
    pub conditionals: usize,
    /// Loop keywords: `for`, `while`. These also count as conditionals.
    pub loops: usize,
    /// `event <name>` declarations.
    pub events: usize,
    /// `modifier <name>` declarations.
    pub modifiers: usize,
}

impl CodeMetrics {
    pub fn extract(code: &str) -> Self {
        Self {
            lines_of_code: code.split('\n').filter(|l| !l.trim().is_empty()).count(),
            functions: FUNCTION_RE.find_iter(code).count(),
            conditionals: CONDITIONAL_RE.find_iter(code).count(),
            loops: LOOP_RE.find_iter(code).count(),
            events: EVENT_RE.find_iter(code).count(),
            modifiers: MODIFIER_RE.find_iter(code).count(),
        }
    }
}
