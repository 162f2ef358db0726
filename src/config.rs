//! Configuration types for the feedback pipeline.

use crate::error::{FeedbackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for the feedback pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Prompt assembly bounds.
    pub prompt: PromptConfig,
    /// Fallback engine settings.
    pub fallback: FallbackConfig,
}

impl FeedbackConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&raw).map_err(|e| FeedbackError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

/// Bounds applied while assembling the generative prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Maximum journal-entry characters included in a prompt.
    pub max_entry_chars: usize,
    /// Maximum number of recent responses included in a prompt.
    pub max_hints: usize,
    /// Maximum characters per included recent response.
    pub max_hint_chars: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_entry_chars: 1200,
            max_hints: 3,
            max_hint_chars: 150,
        }
    }
}

/// Fallback engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Fixed RNG seed for template selection (None = entropy).
    ///
    /// Set under test so the chosen opening phrase is reproducible.
    pub seed: Option<u64>,
    /// Maximum extracted topics used for personalization.
    pub max_topics: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_topics: 3,
        }
    }
}
