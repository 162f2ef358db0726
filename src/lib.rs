//! Sprig: resilient feedback generation for a mood-journaling companion.
//!
//! Given a mood rating (1–10) and an optional journal entry, the pipeline
//! always produces a short empathetic response plus a coarse emotion used to
//! drive the companion-character display — even when the generative model is
//! unavailable, mid-failure, or returning malformed output.
//!
//! # Architecture
//!
//! Two tiers behind one facade:
//! - **Generative path**: availability probe → cached session → bounded
//!   prompt → model call → tolerant parse → emotion mapping + celebratory
//!   clamp.
//! - **Fallback tier**: deterministic, network-free generation from local
//!   sentiment and topic analysis; cannot fail.
//!
//! [`FeedbackOrchestrator::generate`] never raises past its boundary (other
//! than the explicit busy contract); degradation is visible only as
//! `used_generative_model == false`.
//!
//! # Example
//!
//! ```
//! use sprig::{
//!     FeedbackConfig, FeedbackOrchestrator, FeedbackRequest, Rating, UnavailableProvider,
//! };
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let orchestrator = FeedbackOrchestrator::new(
//!     Arc::new(UnavailableProvider::default()),
//!     FeedbackConfig::default(),
//! );
//! let request = FeedbackRequest::new(Rating::clamped(7)).with_text("Quiet day in the garden.");
//! let result = orchestrator.generate(&request).await.expect("no call in flight");
//! assert!(!result.text.is_empty());
//! assert!(!result.used_generative_model);
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod emotion;
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod types;

pub use analysis::{LexiconAnalyzer, LocalAnalyzer, NullAnalyzer};
pub use config::{FallbackConfig, FeedbackConfig, PromptConfig};
pub use error::{FeedbackError, Result};
pub use fallback::FallbackEngine;
pub use orchestrator::FeedbackOrchestrator;
pub use prompt::{PromptBuilder, SYSTEM_PERSONA};
pub use provider::{ModelProvider, ModelSession, UnavailableProvider};
pub use session::SessionManager;
pub use types::{
    AvailabilityState, Emotion, FeedbackRequest, FeedbackResult, ParsedFeedback, Rating,
};
