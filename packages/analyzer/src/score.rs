use serde::{Deserialize, Serialize};

/// An integer score in `0..=100`.
///
/// The only way to build one is through [`Score::clamped`], so every score
/// that leaves this crate is already in range.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
)]
#[serde(transparent)]
#[schema(example = 62)]
pub struct Score(u8);

impl Score {
    pub const MIN: Score = Score(0);
    pub const MAX: Score = Score(100);

    /// Clamp a raw integer into `0..=100`.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    /// Round half away from zero, then clamp.
    pub fn rounded(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::MIN;
        }
        Self::clamped(raw.round() as i64)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Score> for u32 {
    fn from(score: Score) -> Self {
        u32::from(score.0)
    }
}
