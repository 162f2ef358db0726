//! Prompt assembly for the generative path.
//!
//! The persona is fixed at session creation; the per-call prompt is a
//! deterministic template over rating, entry text, and recent responses.
//! Everything user-supplied is truncated before inclusion so a long journal
//! entry or runaway hint list cannot blow up the context.

use crate::config::PromptConfig;
use crate::types::Rating;

/// Fixed persona and output contract, bound to the session at creation.
pub const SYSTEM_PERSONA: &str = "\
You are a warm, encouraging companion inside a mood journaling app.\n\
Write 3-5 sentences and at most 75 words.\n\
Match your tone to the user's rating: 8-10 is celebratory, 4-7 is balanced and \
encouraging, 1-3 is very gentle and validating.\n\
Reference at least one concrete detail from the user's entry.\n\
Offer exactly one small, actionable suggestion.\n\
Vary your phrasing from response to response and never repeat recent responses verbatim.\n\
Never diagnose conditions or give medical advice.";

/// Deterministic prompt template over rating, entry text, and recent hints.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    config: PromptConfig,
}

impl PromptBuilder {
    /// Create a builder with the given bounds.
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    /// Assemble the per-call prompt.
    ///
    /// Sections, joined by blank lines (empty sections skipped):
    /// 1. The rating line.
    /// 2. The quoted entry text, truncated to the configured bound.
    /// 3. Up to `max_hints` recent responses, each truncated, under a header
    ///    instructing the model to vary its wording.
    /// 4. The closing JSON-object instruction.
    pub fn build(&self, rating: Rating, text: &str, hints: &[String]) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(4);

        parts.push(format!("User's emotion rating: {rating}/10"));

        if !text.is_empty() {
            let entry = truncate_chars(text, self.config.max_entry_chars);
            parts.push(format!("The user's journal entry:\n\"{entry}\""));
        }

        if !hints.is_empty() {
            let mut section = String::from(
                "Your recent responses, most recent first. \
                 Vary your wording and do not repeat any of them:",
            );
            for hint in hints.iter().take(self.config.max_hints) {
                section.push_str("\n- ");
                section.push_str(truncate_chars(hint, self.config.max_hint_chars));
            }
            parts.push(section);
        }

        parts.push(
            "Respond with only a JSON object with string field \"text\", string field \
             \"emotionHint\", and array-of-strings field \"tags\"."
                .to_owned(),
        );

        parts.join("\n\n")
    }
}

/// Truncate to at most `max` characters, respecting char boundaries.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn builder() -> PromptBuilder {
        PromptBuilder::new(PromptConfig::default())
    }

    fn r(v: u8) -> Rating {
        Rating::clamped(v)
    }

    #[test]
    fn rating_line_always_present() {
        let prompt = builder().build(r(7), "", &[]);
        assert!(prompt.starts_with("User's emotion rating: 7/10"));
    }

    #[test]
    fn empty_text_and_hints_skip_their_sections() {
        let prompt = builder().build(r(5), "", &[]);
        assert!(!prompt.contains("journal entry"));
        assert!(!prompt.contains("recent responses"));
        assert!(prompt.contains("JSON object"));
    }

    #[test]
    fn entry_text_is_quoted() {
        let prompt = builder().build(r(5), "Slept well, felt rested.", &[]);
        assert!(prompt.contains("\"Slept well, felt rested.\""));
    }

    #[test]
    fn entry_text_truncated_to_bound() {
        let long = "x".repeat(5000);
        let prompt = builder().build(r(5), &long, &[]);
        assert!(prompt.contains(&"x".repeat(1200)));
        assert!(!prompt.contains(&"x".repeat(1201)));
    }

    #[test]
    fn only_first_three_hints_included() {
        let hints: Vec<String> = (0..5).map(|i| format!("hint number {i}")).collect();
        let prompt = builder().build(r(5), "", &hints);
        assert!(prompt.contains("hint number 0"));
        assert!(prompt.contains("hint number 1"));
        assert!(prompt.contains("hint number 2"));
        assert!(!prompt.contains("hint number 3"));
        assert!(!prompt.contains("hint number 4"));
    }

    #[test]
    fn hints_truncated_to_bound() {
        let hints = vec!["y".repeat(400)];
        let prompt = builder().build(r(5), "", &hints);
        assert!(prompt.contains(&"y".repeat(150)));
        assert!(!prompt.contains(&"y".repeat(151)));
    }

    #[test]
    fn hint_section_instructs_variation() {
        let hints = vec!["Well done today!".to_owned()];
        let prompt = builder().build(r(8), "", &hints);
        assert!(prompt.contains("Vary your wording"));
        assert!(prompt.contains("- Well done today!"));
    }

    #[test]
    fn closing_instruction_names_all_fields() {
        let prompt = builder().build(r(5), "entry", &[]);
        assert!(prompt.contains("\"text\""));
        assert!(prompt.contains("\"emotionHint\""));
        assert!(prompt.contains("\"tags\""));
    }

    #[test]
    fn template_is_deterministic() {
        let hints = vec!["a".to_owned(), "b".to_owned()];
        let one = builder().build(r(3), "rough day", &hints);
        let two = builder().build(r(3), "rough day", &hints);
        assert_eq!(one, two);
    }

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        let text = "héllo wörld".repeat(200);
        let prompt = builder().build(r(5), &text, &[]);
        // Must not panic, and output must stay valid UTF-8 (implicit).
        assert!(prompt.contains("héllo"));
    }

    #[test]
    fn persona_encodes_tone_buckets() {
        assert!(SYSTEM_PERSONA.contains("8-10"));
        assert!(SYSTEM_PERSONA.contains("4-7"));
        assert!(SYSTEM_PERSONA.contains("1-3"));
        assert!(SYSTEM_PERSONA.contains("75 words"));
        assert!(SYSTEM_PERSONA.contains("medical advice"));
    }
}
