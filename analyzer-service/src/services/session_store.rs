//! In-process session storage.
//!
//! The store is owned by the application state and handed to request handlers
//! explicitly. Sessions that stay idle past the configured TTL are reclaimed
//! by a background sweep (see `startup`), so abandoned sessions do not
//! accumulate for the process lifetime.

use crate::models::Session;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use service_core::error::AppError;
use std::sync::Arc;

/// Concurrent map of session id to accumulated chunks.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an extracted chunk, creating the session on first upload.
    pub fn append_chunk(&self, session_id: &str, text: String) {
        self.inner
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id.to_string()))
            .push_chunk(text);
    }

    /// All chunks for the session, newline-joined in arrival order.
    ///
    /// A session with no stored chunks is not-found, never an empty string.
    pub fn merged_code(&self, session_id: &str) -> Result<String, AppError> {
        self.inner
            .get(session_id)
            .map(|session| session.merged_code())
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("No code found")))
    }

    /// Drop the session's chunks. Returns whether anything was stored.
    /// Unknown sessions are a no-op, not an error.
    pub fn reset(&self, session_id: &str) -> bool {
        self.inner.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than `ttl`. Returns the eviction count.
    pub fn evict_expired(&self, ttl: Duration) -> usize {
        let now = Utc::now();
        let before = self.inner.len();
        self.inner.retain(|_, session| !session.is_expired(ttl, now));
        before.saturating_sub(self.inner.len())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
