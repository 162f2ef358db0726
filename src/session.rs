//! Lazy, cached session ownership.
//!
//! The original design kept the session as an ambient process-wide singleton
//! with unserialized access. Here the cache has one documented owner (the
//! orchestrator holds the manager) and creation/reuse is serialized behind a
//! `tokio::sync::Mutex`, so two racing generations cannot create two sessions.

use crate::error::Result;
use crate::prompt::SYSTEM_PERSONA;
use crate::provider::{ModelProvider, ModelSession};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Owns the single cached session for one provider.
pub struct SessionManager {
    provider: Arc<dyn ModelProvider>,
    session: Mutex<Option<Arc<dyn ModelSession>>>,
}

impl SessionManager {
    /// Create a manager with an empty cache.
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            session: Mutex::new(None),
        }
    }

    /// Return the cached session, creating and caching one on first use.
    ///
    /// The lock is held across creation: concurrent callers wait rather than
    /// racing to create duplicate sessions.
    pub async fn get_or_create(&self) -> Result<Arc<dyn ModelSession>> {
        let mut slot = self.session.lock().await;
        if let Some(session) = slot.as_ref() {
            debug!(provider = self.provider.name(), "reusing cached session");
            return Ok(Arc::clone(session));
        }
        info!(provider = self.provider.name(), "creating model session");
        let session = self.provider.create_session(SYSTEM_PERSONA).await?;
        *slot = Some(Arc::clone(&session));
        Ok(session)
    }

    /// Discard the cached session, forcing recreation on next use.
    ///
    /// Used for recovery after a systemic failure or backend upgrade.
    pub async fn reset(&self) {
        let mut slot = self.session.lock().await;
        if slot.take().is_some() {
            info!(provider = self.provider.name(), "session cache reset");
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}
