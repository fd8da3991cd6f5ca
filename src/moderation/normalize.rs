// Label normalization: moderation labels to the TrueSight score string.
//
// The oracle contract expects exactly five integer confidences in a fixed
// order. Rekognition can report every one of these top-level categories, so a
// missing label means the service saw no evidence of it: score 0, never null.

use std::fmt;

use super::traits::ModerationLabel;

/// The five scored categories, in output order.
pub const MODERATION_CATEGORIES: [&str; 5] = [
    "Explicit Nudity",
    "Suggestive",
    "Violence",
    "Visually Disturbing",
    "Hate Symbols",
];

/// Five integer confidences (0..=100) in `MODERATION_CATEGORIES` order.
///
/// Displays as the comma-joined string the oracle consumes, e.g. `2,0,96,0,0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizedResult(pub [u8; 5]);

impl NormalizedResult {
    pub fn scores(&self) -> &[u8; 5] {
        &self.0
    }
}

impl fmt::Display for NormalizedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, score) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{score}")?;
        }
        Ok(())
    }
}

/// Confidence for one category: the first label whose name matches
/// case-insensitively, rounded half away from zero and clamped to 0..=100.
/// Returns 0 when no label matches.
pub fn confidence_for(labels: &[ModerationLabel], category: &str) -> u8 {
    let category = category.to_lowercase();
    labels
        .iter()
        .find(|label| label.name.to_lowercase() == category)
        .map(|label| round_confidence(label.confidence))
        .unwrap_or(0)
}

/// Score every category in fixed order.
pub fn normalize(labels: &[ModerationLabel]) -> NormalizedResult {
    NormalizedResult(MODERATION_CATEGORIES.map(|category| confidence_for(labels, category)))
}

fn round_confidence(confidence: f64) -> u8 {
    if !confidence.is_finite() {
        return 0;
    }
    confidence.round().clamp(0.0, 100.0) as u8
}
