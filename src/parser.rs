//! Recovery of structured feedback from raw model output.
//!
//! The prompt demands a JSON object, but model output is untrusted: three
//! tiers, each strictly weaker, guarantee we always leave with usable text.
//!
//! 1. Strict `serde_json` decode of `{"text", "emotionHint", "tags"}`.
//! 2. A `"text":` marker scan that recovers the quoted value from almost-JSON
//!    (truncated output, trailing prose, unescaped stray braces).
//! 3. The raw output verbatim.
//!
//! Every tier runs the final text through [`strip_markdown`], which is
//! idempotent.

use crate::types::ParsedFeedback;
use tracing::debug;

/// Emotion hint assumed when the structured decode fails and we only have
/// recovered or verbatim text to work with.
const RECOVERED_HINT: &str = "supportive";

/// Parse raw model output into a [`ParsedFeedback`]. Never fails.
pub fn parse(raw: &str) -> ParsedFeedback {
    if let Ok(mut parsed) = serde_json::from_str::<ParsedFeedback>(raw) {
        parsed.text = strip_markdown(&parsed.text);
        return parsed;
    }

    if let Some(text) = extract_text_field(raw) {
        debug!("structured decode failed; recovered text via marker scan");
        return ParsedFeedback {
            text: strip_markdown(&text),
            emotion_hint: RECOVERED_HINT.to_owned(),
            tags: None,
        };
    }

    debug!("structured decode and marker scan failed; using raw output verbatim");
    ParsedFeedback {
        text: strip_markdown(raw),
        emotion_hint: RECOVERED_HINT.to_owned(),
        tags: None,
    }
}

/// Recover the quoted value of a `"text":` field from almost-JSON.
///
/// Finds the `"text"` marker, skips to the opening quote after the colon, and
/// takes everything up to the next `",` sequence. Returns `None` when any of
/// those landmarks is missing.
fn extract_text_field(raw: &str) -> Option<String> {
    let marker = raw.find("\"text\"")?;
    let after_marker = &raw[marker + "\"text\"".len()..];
    let colon = after_marker.find(':')?;
    let after_colon = &after_marker[colon + 1..];
    let open_quote = after_colon.find('"')?;
    let value_and_rest = &after_colon[open_quote + 1..];
    let end = value_and_rest.find("\",")?;
    let value = &value_and_rest[..end];
    if value.trim().is_empty() {
        return None;
    }
    Some(value.to_owned())
}

/// Minimize markdown noise in model text: strip heading markers (`#`–`####`)
/// and horizontal-rule lines (`---`), then trim surrounding whitespace.
///
/// Idempotent: `strip_markdown(strip_markdown(x)) == strip_markdown(x)`.
pub fn strip_markdown(text: &str) -> String {
    let cleaned: Vec<&str> = text
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            if is_horizontal_rule(trimmed) {
                return None;
            }
            if trimmed.starts_with('#') {
                // Strip marker runs until none remain, then re-check the
                // residual, so repeated application is a no-op.
                let mut rest = trimmed;
                while rest.starts_with('#') {
                    rest = rest.trim_start_matches('#').trim_start();
                }
                if is_horizontal_rule(rest) {
                    return None;
                }
                return Some(rest);
            }
            Some(line)
        })
        .collect();
    cleaned.join("\n").trim().to_owned()
}

fn is_horizontal_rule(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}
