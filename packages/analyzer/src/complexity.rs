use crate::metrics::CodeMetrics;
use crate::score::Score;

/// Per-occurrence weights, in tenths of a point.
const LINE_WEIGHT: u64 = 3;
const FUNCTION_WEIGHT: u64 = 50;
const CONDITIONAL_WEIGHT: u64 = 30;
const LOOP_WEIGHT: u64 = 40;

/// `round(0.3·lines + 5·functions + 3·conditionals + 4·loops)`, clamped.
///
/// Accumulated in integer tenths so the half-point rounding is exact.
pub fn complexity_score(metrics: &CodeMetrics) -> Score {
    let tenths = weighted(metrics.lines_of_code, LINE_WEIGHT)
        .saturating_add(weighted(metrics.functions, FUNCTION_WEIGHT))
        .saturating_add(weighted(metrics.conditionals, CONDITIONAL_WEIGHT))
        .saturating_add(weighted(metrics.loops, LOOP_WEIGHT));

    let rounded = tenths.saturating_add(5) / 10;
    Score::clamped(i64::try_from(rounded).unwrap_or(i64::MAX))
}

fn weighted(count: usize, weight: u64) -> u64 {
    (count as u64).saturating_mul(weight)
}
