//! Capability seam for the generative backend.
//!
//! [`ModelProvider`] abstracts over whatever on-device (or remote) generative
//! runtime is present. Environments with no usable backend plug in
//! [`UnavailableProvider`] so the orchestrator's control flow is identical
//! everywhere and simply degrades to the fallback engine.

use crate::error::{FeedbackError, Result};
use crate::types::AvailabilityState;
use async_trait::async_trait;
use std::sync::Arc;

/// A live conversational handle bound to one fixed instruction string.
#[async_trait]
pub trait ModelSession: Send + Sync {
    /// Send one prompt and await the raw model output.
    async fn respond(&self, prompt: &str) -> Result<String>;
}

/// A generative backend capable of reporting availability and opening sessions.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name for logging (e.g. `"on-device"`, `"stub"`).
    fn name(&self) -> &str;

    /// Current usability of the backend.
    ///
    /// A pure read: no retries, no side effects. An unavailable state carries
    /// a human-readable reason for optional caller-side messaging.
    fn availability(&self) -> AvailabilityState;

    /// Open a session bound to the given instruction string.
    async fn create_session(&self, instructions: &str) -> Result<Arc<dyn ModelSession>>;
}

/// Stub provider for environments with no generative backend.
///
/// Always reports unavailable with a fixed reason; opening a session is a
/// contract violation and fails.
#[derive(Debug, Clone)]
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    /// Create a stub provider with the given unavailability reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableProvider {
    fn default() -> Self {
        Self::new("generative backend not supported on this platform")
    }
}

#[async_trait]
impl ModelProvider for UnavailableProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn availability(&self) -> AvailabilityState {
        AvailabilityState::unavailable(self.reason.clone())
    }

    async fn create_session(&self, _instructions: &str) -> Result<Arc<dyn ModelSession>> {
        Err(FeedbackError::Session(format!(
            "backend unavailable: {}",
            self.reason
        )))
    }
}
