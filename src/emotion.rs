//! Mapping free-text emotion hints onto mascot emotions.
//!
//! Two layers, mirroring how the rest of the pipeline treats model output as
//! untrusted: a fixed-priority substring scan over the lowercased hint, then a
//! rating-derived default when nothing matches. On top sits the celebratory
//! clamp, a product policy: a self-reported great day never shows a
//! non-celebratory mascot, whatever the text analysis said.

use crate::types::{Emotion, Rating};

/// (substrings, emotion) in priority order. First match wins.
const HINT_TABLE: &[(&[&str], Emotion)] = &[
    (&["happy", "proud"], Emotion::Happy),
    (&["support", "encourage"], Emotion::Supportive),
    (&["concern", "tough", "hard"], Emotion::Concerned),
    (&["thinking"], Emotion::Thinking),
    (&["sleep"], Emotion::Sleeping),
    (&["neutral"], Emotion::Neutral),
];

/// Map a free-text hint onto a mascot emotion.
///
/// Scans [`HINT_TABLE`] in priority order against the lowercased hint; when no
/// substring matches, falls back to [`rating_bucket`].
pub fn map_hint(hint: &str, rating: Rating) -> Emotion {
    let lower = hint.to_lowercase();
    for &(substrings, emotion) in HINT_TABLE {
        if substrings.iter().any(|s| lower.contains(s)) {
            return emotion;
        }
    }
    rating_bucket(rating)
}

/// Default emotion derived from the rating alone.
pub fn rating_bucket(rating: Rating) -> Emotion {
    match rating.get() {
        8..=10 => Emotion::Happy,
        5..=7 => Emotion::Supportive,
        _ => Emotion::Concerned,
    }
}

/// Celebratory clamp: for `rating >= 8`, anything outside `{Happy, Proud}` is
/// forced to `Happy`. Lower ratings pass through unmodified.
pub fn clamp(emotion: Emotion, rating: Rating) -> Emotion {
    if rating.is_celebratory() && !matches!(emotion, Emotion::Happy | Emotion::Proud) {
        return Emotion::Happy;
    }
    emotion
}
