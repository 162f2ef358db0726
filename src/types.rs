//! Core value types for the feedback pipeline.

use serde::{Deserialize, Serialize};

/// A self-reported mood rating, always in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Lowest valid rating.
    pub const MIN: u8 = 1;
    /// Highest valid rating.
    pub const MAX: u8 = 10;

    /// Create a rating, returning `None` when `value` is outside `1..=10`.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Create a rating, saturating out-of-range input into `1..=10`.
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// The numeric value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether the rating falls in the celebratory bucket (`8..=10`).
    ///
    /// The clamp policy and the prompt's tone instructions both key off this.
    pub fn is_celebratory(self) -> bool {
        self.0 >= 8
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of mascot emotion display states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// Celebratory: a great day.
    Happy,
    /// Encouraging: things are okay, keep going.
    Supportive,
    /// Gentle: a rough day.
    Concerned,
    /// Recognition of an achievement.
    Proud,
    /// Reflective / pondering.
    Thinking,
    /// Resting state.
    Sleeping,
    /// No strong signal.
    Neutral,
}

impl Emotion {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Supportive => "supportive",
            Self::Concerned => "concerned",
            Self::Proud => "proud",
            Self::Thinking => "thinking",
            Self::Sleeping => "sleeping",
            Self::Neutral => "neutral",
        }
    }

    /// The emoji the fallback engine closes its messages with.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Happy => "\u{1F389}",      // 🎉
            Self::Supportive => "\u{1F331}", // 🌱
            Self::Concerned => "\u{1F499}",  // 💙
            Self::Proud => "\u{1F31F}",      // 🌟
            Self::Thinking => "\u{1F4AD}",   // 💭
            Self::Sleeping => "\u{1F634}",   // 😴
            Self::Neutral => "\u{1F642}",    // 🙂
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input to a single feedback generation.
#[derive(Debug, Clone)]
pub struct FeedbackRequest {
    /// Self-reported mood rating.
    pub rating: Rating,
    /// Optional journal entry text. Unbounded at rest; truncated before any
    /// prompt inclusion.
    pub text: Option<String>,
    /// Previously generated responses, most-recent-first. Only the first 3
    /// are ever used, each truncated before prompt inclusion.
    pub recent_hints: Vec<String>,
}

impl FeedbackRequest {
    /// Create a request with no entry text and no hints.
    pub fn new(rating: Rating) -> Self {
        Self {
            rating,
            text: None,
            recent_hints: Vec::new(),
        }
    }

    /// Attach journal entry text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attach recent generated responses, most-recent-first.
    pub fn with_recent_hints(mut self, hints: Vec<String>) -> Self {
        self.recent_hints = hints;
        self
    }

    /// The entry text, with `None` and whitespace-only collapsed to `""`.
    pub(crate) fn entry_text(&self) -> &str {
        self.text.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Output of a single feedback generation.
///
/// `text` is never empty: the fallback engine guarantees a message on every
/// degrade path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackResult {
    /// The empathetic response shown to the user.
    pub text: String,
    /// Mascot emotion driving the companion-character display.
    pub emotion: Emotion,
    /// `true` when the generative model produced the text, `false` when the
    /// deterministic fallback did.
    pub used_generative_model: bool,
}

/// Reported usability of the generative backend.
///
/// `Unavailable` is a state, not an error: the caller may use `reason` for an
/// optional "enable richer feedback" notice, but the pipeline degrades to the
/// fallback either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityState {
    /// The backend can accept a generation call.
    Available,
    /// The backend cannot be used right now.
    Unavailable {
        /// Human-readable explanation (e.g. "model not ready").
        reason: String,
    },
}

impl AvailabilityState {
    /// Build an unavailable state with the given reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Whether the backend is usable.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Structured payload recovered from raw model output.
///
/// The wire shape is the JSON object the prompt demands:
/// `{"text": ..., "emotionHint": ..., "tags": [...]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParsedFeedback {
    /// The response body.
    pub text: String,
    /// Free-text emotion hint, mapped onto [`Emotion`] by the mapper.
    #[serde(rename = "emotionHint")]
    pub emotion_hint: String,
    /// Optional topic tags the model extracted.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}
