//! Error types for the feedback pipeline.

/// Top-level error type for the feedback pipeline.
///
/// Most variants are internal: the orchestrator catches provider, session, and
/// parse failures and degrades to the fallback engine instead of surfacing
/// them. The only variant that crosses the public boundary is [`Busy`].
///
/// [`Busy`]: FeedbackError::Busy
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    /// A generation is already in flight for this orchestrator.
    #[error("a feedback generation is already in flight")]
    Busy,

    /// Generative backend error (invocation failed or backend rejected the call).
    #[error("provider error: {0}")]
    Provider(String),

    /// Session creation or reuse error.
    #[error("session error: {0}")]
    Session(String),

    /// Model output could not be turned into usable feedback.
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, FeedbackError>;
