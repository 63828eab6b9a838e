use crate::score::Score;

/// Weights in tenths: security 40%, complexity 30%, quality 30%.
const SECURITY_WEIGHT: u32 = 4;
const COMPLEXITY_WEIGHT: u32 = 3;
const QUALITY_WEIGHT: u32 = 3;

/// `round(0.4·security + 0.3·complexity + 0.3·quality)`.
///
/// Inputs are already clamped, so the weighted sum never exceeds 1000 tenths.
pub fn final_score(security: Score, complexity: Score, quality: Score) -> Score {
    let tenths = SECURITY_WEIGHT * u32::from(security)
        + COMPLEXITY_WEIGHT * u32::from(complexity)
        + QUALITY_WEIGHT * u32::from(quality);
    debug_assert!(tenths <= 1000, "component scores out of range");

    Score::clamped(i64::from((tenths + 5) / 10))
}
