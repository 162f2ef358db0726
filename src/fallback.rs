//! Deterministic, network-free feedback generation.
//!
//! The guaranteed backstop: given any rating and any text it produces a
//! non-empty message and a valid mascot emotion, using only the local
//! [`LocalAnalyzer`]. Latency is bounded by a single lexicon scan; there is no
//! I/O and no failure path.
//!
//! Message shape: one of three randomized opening phrases for the resolved
//! emotion bucket, a fixed validating body, exactly one grounding suggestion,
//! and a closing emoji. Openings are personalized with the first extracted
//! topic noun, or a generic placeholder when the entry yields none.
//!
//! Unlike the generative path, the fallback does not consume recent responses
//! for novelty avoidance; only the RNG varies its phrasing.

use crate::analysis::LocalAnalyzer;
use crate::config::FallbackConfig;
use crate::types::{Emotion, Rating};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::sync::Mutex;
use tracing::debug;

/// Placeholder topic when the entry yields no usable noun.
const GENERIC_TOPIC: &str = "what you're experiencing";

/// Sentiment magnitude beyond which the score overrides the middle rating band.
const STRONG_SENTIMENT: f32 = 0.5;

/// Opening phrases per bucket. `{topic}` is substituted before use.
const HAPPY_OPENINGS: [&str; 3] = [
    "What a bright day — it sounds like {topic} really went your way!",
    "I love hearing this much good energy around {topic}!",
    "You should feel great about how {topic} turned out today!",
];

const SUPPORTIVE_OPENINGS: [&str; 3] = [
    "Thanks for sharing how {topic} is going for you.",
    "I can tell {topic} has been on your mind today.",
    "You're showing up for yourself, even with {topic} in the mix.",
];

const CONCERNED_OPENINGS: [&str; 3] = [
    "I hear how {topic} is affecting you right now.",
    "It sounds like {topic} made today genuinely heavy.",
    "Thank you for being honest about {topic} — that takes courage.",
];

/// Fixed validating body per bucket.
fn body(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Happy => "Days like this are worth savouring, so let it sink in.",
        Emotion::Concerned => {
            "Whatever you're feeling is valid, and you don't have to carry it all at once."
        }
        _ => "Every entry you write is a small act of looking after yourself.",
    }
}

/// Exactly one grounding, actionable suggestion per bucket.
fn suggestion(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Happy => {
            "Take a moment to jot down one thing that made it special, so you can revisit it later."
        }
        Emotion::Concerned => {
            "Try one slow breath in for four counts and out for six before you move on."
        }
        _ => "Maybe note one small thing you'd like tomorrow to hold.",
    }
}

/// Deterministic local feedback generator.
///
/// Cannot fail: every call returns non-empty text and a valid emotion.
pub struct FallbackEngine {
    analyzer: Arc<dyn LocalAnalyzer>,
    config: FallbackConfig,
    rng: Mutex<StdRng>,
}

impl FallbackEngine {
    /// Create an engine over the given analyzer.
    ///
    /// When `config.seed` is set the opening-phrase choice is reproducible;
    /// otherwise the RNG is seeded from entropy.
    pub fn new(analyzer: Arc<dyn LocalAnalyzer>, config: FallbackConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            analyzer,
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Generate a message and emotion for the given rating and entry text.
    pub fn generate(&self, rating: Rating, text: &str) -> (String, Emotion) {
        let sentiment = self.analyzer.sentiment(text);
        let emotion = blended_emotion(rating, sentiment);
        let topics = self.keywords(text);
        debug!(
            rating = rating.get(),
            sentiment,
            emotion = emotion.as_str(),
            topics = topics.len(),
            "fallback generation"
        );
        let message = self.message(emotion, &topics);
        (message, emotion)
    }

    /// Up to `max_topics` deduplicated topic nouns for personalization.
    fn keywords(&self, text: &str) -> Vec<String> {
        let mut topics = self.analyzer.nouns(text);
        topics.truncate(self.config.max_topics);
        topics
    }

    fn message(&self, emotion: Emotion, topics: &[String]) -> String {
        let openings: &[&str; 3] = match emotion {
            Emotion::Happy => &HAPPY_OPENINGS,
            Emotion::Concerned => &CONCERNED_OPENINGS,
            _ => &SUPPORTIVE_OPENINGS,
        };
        let pick = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen_range(0..openings.len())
        };
        let topic = topics.first().map(String::as_str).unwrap_or(GENERIC_TOPIC);
        let opening = openings[pick].replace("{topic}", topic);

        format!(
            "{opening} {} {} {}",
            body(emotion),
            suggestion(emotion),
            emotion.emoji()
        )
    }
}

impl std::fmt::Debug for FallbackEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Blend the self-reported rating with the analyzed sentiment.
///
/// The rating dominates at both extremes; sentiment only decides the middle
/// band, and only when its magnitude exceeds [`STRONG_SENTIMENT`]. For
/// `rating >= 8` this always yields `Happy`, which is what lets the
/// orchestrator skip the celebratory clamp on the fallback path.
pub fn blended_emotion(rating: Rating, sentiment: f32) -> Emotion {
    if rating.is_celebratory() {
        Emotion::Happy
    } else if rating.get() <= 4 || sentiment < -STRONG_SENTIMENT {
        Emotion::Concerned
    } else if sentiment > STRONG_SENTIMENT {
        Emotion::Happy
    } else {
        Emotion::Supportive
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::analysis::{LexiconAnalyzer, NullAnalyzer};

    fn engine_with_seed(seed: u64) -> FallbackEngine {
        FallbackEngine::new(
            Arc::new(LexiconAnalyzer::new()),
            FallbackConfig {
                seed: Some(seed),
                ..FallbackConfig::default()
            },
        )
    }

    fn r(v: u8) -> Rating {
        Rating::clamped(v)
    }

    // ── blended_emotion ─────────────────────────────────────────────────

    #[test]
    fn low_rating_is_concerned_regardless_of_sentiment() {
        assert_eq!(blended_emotion(r(1), 1.0), Emotion::Concerned);
        assert_eq!(blended_emotion(r(4), 0.9), Emotion::Concerned);
    }

    #[test]
    fn strong_negative_sentiment_is_concerned_in_middle_band() {
        assert_eq!(blended_emotion(r(6), -0.8), Emotion::Concerned);
    }

    #[test]
    fn high_rating_is_happy_regardless_of_sentiment() {
        assert_eq!(blended_emotion(r(8), -0.2), Emotion::Happy);
        assert_eq!(blended_emotion(r(9), -0.9), Emotion::Happy);
        assert_eq!(blended_emotion(r(10), 0.0), Emotion::Happy);
    }

    #[test]
    fn strong_positive_sentiment_is_happy_in_middle_band() {
        assert_eq!(blended_emotion(r(6), 0.8), Emotion::Happy);
    }

    #[test]
    fn middle_band_with_weak_sentiment_is_supportive() {
        assert_eq!(blended_emotion(r(5), 0.0), Emotion::Supportive);
        assert_eq!(blended_emotion(r(7), -0.3), Emotion::Supportive);
        assert_eq!(blended_emotion(r(6), 0.5), Emotion::Supportive);
    }

    // ── generate ────────────────────────────────────────────────────────

    #[test]
    fn always_returns_nonempty_text() {
        let engine = engine_with_seed(1);
        for v in 1..=10 {
            for text in ["", "a fine day", "hopeless and exhausted"] {
                let (message, _) = engine.generate(r(v), text);
                assert!(!message.is_empty(), "empty message for rating {v} / {text:?}");
            }
        }
    }

    #[test]
    fn emotion_is_policy_consistent_at_high_ratings() {
        let engine = engine_with_seed(2);
        for v in 8..=10 {
            let (_, emotion) = engine.generate(r(v), "hopeless awful terrible");
            assert_eq!(emotion, Emotion::Happy);
        }
    }

    #[test]
    fn negative_entry_at_low_rating_is_concerned() {
        let engine = engine_with_seed(3);
        let (message, emotion) =
            engine.generate(r(3), "My job interview went badly and I feel exhausted");
        assert_eq!(emotion, Emotion::Concerned);
        assert!(
            message.contains("job") || message.contains("interview"),
            "message should reference an extracted noun: {message}"
        );
    }

    #[test]
    fn empty_entry_uses_generic_placeholder() {
        let engine = engine_with_seed(4);
        let (message, emotion) = engine.generate(r(9), "");
        assert_eq!(emotion, Emotion::Happy);
        assert!(message.contains(GENERIC_TOPIC), "message: {message}");
    }

    #[test]
    fn message_closes_with_bucket_emoji() {
        let engine = engine_with_seed(5);
        let (happy, _) = engine.generate(r(9), "");
        assert!(happy.ends_with(Emotion::Happy.emoji()));
        let (concerned, _) = engine.generate(r(2), "");
        assert!(concerned.ends_with(Emotion::Concerned.emoji()));
        let (supportive, _) = engine.generate(r(6), "");
        assert!(supportive.ends_with(Emotion::Supportive.emoji()));
    }

    #[test]
    fn message_contains_exactly_one_suggestion() {
        let engine = engine_with_seed(6);
        let (message, emotion) = engine.generate(r(6), "quiet afternoon in the garden");
        let needle = suggestion(emotion);
        assert_eq!(message.matches(needle).count(), 1);
    }

    #[test]
    fn seeded_engines_are_reproducible() {
        let a = engine_with_seed(7).generate(r(5), "long walk by the river");
        let b = engine_with_seed(7).generate(r(5), "long walk by the river");
        assert_eq!(a, b);
    }

    #[test]
    fn openings_vary_across_calls() {
        let engine = engine_with_seed(8);
        let distinct: std::collections::HashSet<String> = (0..32)
            .map(|_| engine.generate(r(5), "busy week at work").0)
            .collect();
        assert!(distinct.len() > 1, "opening choice never varied");
    }

    #[test]
    fn topics_capped_at_configured_maximum() {
        let engine = engine_with_seed(9);
        let topics =
            engine.keywords("garden kitchen office river mountain library station harbour");
        assert!(topics.len() <= 3);
    }

    #[test]
    fn null_analyzer_still_yields_valid_output() {
        let engine = FallbackEngine::new(
            Arc::new(NullAnalyzer),
            FallbackConfig {
                seed: Some(10),
                ..FallbackConfig::default()
            },
        );
        let (message, emotion) = engine.generate(r(2), "anything at all");
        assert!(!message.is_empty());
        assert_eq!(emotion, Emotion::Concerned);
        assert!(message.contains(GENERIC_TOPIC));
    }
}
