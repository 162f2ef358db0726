//! Public facade sequencing the feedback pipeline.
//!
//! One call, one pass, no retries: probe availability, run the generative
//! path if possible, and degrade to the fallback engine on any failure. Every
//! call terminates in a complete [`FeedbackResult`]; the only error that
//! crosses this boundary is [`FeedbackError::Busy`] from the single-slot
//! in-flight guard.

use crate::analysis::{LexiconAnalyzer, LocalAnalyzer};
use crate::config::FeedbackConfig;
use crate::emotion;
use crate::error::{FeedbackError, Result};
use crate::fallback::FallbackEngine;
use crate::parser;
use crate::prompt::PromptBuilder;
use crate::provider::ModelProvider;
use crate::session::SessionManager;
use crate::types::{AvailabilityState, FeedbackRequest, FeedbackResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Best-effort feedback generator over a generative backend with a
/// deterministic fallback tier.
pub struct FeedbackOrchestrator {
    provider: Arc<dyn ModelProvider>,
    sessions: SessionManager,
    prompt: PromptBuilder,
    fallback: FallbackEngine,
    in_flight: AtomicBool,
}

impl FeedbackOrchestrator {
    /// Create an orchestrator with the default lexicon analyzer.
    pub fn new(provider: Arc<dyn ModelProvider>, config: FeedbackConfig) -> Self {
        Self::with_analyzer(provider, config, Arc::new(LexiconAnalyzer::new()))
    }

    /// Create an orchestrator with a custom local analyzer.
    pub fn with_analyzer(
        provider: Arc<dyn ModelProvider>,
        config: FeedbackConfig,
        analyzer: Arc<dyn LocalAnalyzer>,
    ) -> Self {
        Self {
            sessions: SessionManager::new(Arc::clone(&provider)),
            prompt: PromptBuilder::new(config.prompt),
            fallback: FallbackEngine::new(analyzer, config.fallback),
            provider,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Current availability of the generative backend.
    ///
    /// Exposed so the caller can show an "enable richer feedback" notice when
    /// results keep coming from the fallback tier.
    pub fn availability(&self) -> AvailabilityState {
        self.provider.availability()
    }

    /// Discard the cached session, forcing recreation on the next call.
    pub async fn reset_session(&self) {
        self.sessions.reset().await;
    }

    /// Generate feedback for one journal entry.
    ///
    /// At most one generation runs at a time: a call arriving while another is
    /// in flight returns [`FeedbackError::Busy`] instead of queuing. Every
    /// admitted call returns a complete result — generative-path failures
    /// degrade silently to the fallback engine and are visible only as
    /// `used_generative_model == false`.
    pub async fn generate(&self, request: &FeedbackRequest) -> Result<FeedbackResult> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(FeedbackError::Busy);
        }
        // Clears the slot even if the caller drops the future mid-generation.
        let _slot = InFlightSlot(&self.in_flight);

        Ok(self.generate_admitted(request).await)
    }

    async fn generate_admitted(&self, request: &FeedbackRequest) -> FeedbackResult {
        match self.provider.availability() {
            AvailabilityState::Unavailable { reason } => {
                info!(reason, "generative backend unavailable; using fallback");
                self.fallback_result(request)
            }
            AvailabilityState::Available => match self.generate_with_model(request).await {
                Ok(result) => result,
                Err(err) => {
                    warn!(error = %err, "generative path failed; degrading to fallback");
                    self.fallback_result(request)
                }
            },
        }
    }

    async fn generate_with_model(&self, request: &FeedbackRequest) -> Result<FeedbackResult> {
        let prompt = self
            .prompt
            .build(request.rating, request.entry_text(), &request.recent_hints);
        let session = self.sessions.get_or_create().await?;
        let raw = session.respond(&prompt).await?;

        let parsed = parser::parse(&raw);
        if parsed.text.is_empty() {
            return Err(FeedbackError::Parse("model returned no usable text".to_owned()));
        }

        let mapped = emotion::map_hint(&parsed.emotion_hint, request.rating);
        let final_emotion = emotion::clamp(mapped, request.rating);
        debug!(
            hint = parsed.emotion_hint.as_str(),
            mapped = mapped.as_str(),
            emotion = final_emotion.as_str(),
            "generative feedback produced"
        );

        Ok(FeedbackResult {
            text: parsed.text,
            emotion: final_emotion,
            used_generative_model: true,
        })
    }

    /// The fallback emotion is already policy-consistent (rating >= 8 maps to
    /// Happy by construction), so the celebratory clamp is not reapplied.
    fn fallback_result(&self, request: &FeedbackRequest) -> FeedbackResult {
        let (text, emotion) = self.fallback.generate(request.rating, request.entry_text());
        FeedbackResult {
            text,
            emotion,
            used_generative_model: false,
        }
    }
}

impl std::fmt::Debug for FeedbackOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackOrchestrator")
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag on drop.
struct InFlightSlot<'a>(&'a AtomicBool);

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
