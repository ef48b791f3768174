//! Session model for accumulating OCR-extracted code chunks.

use chrono::{DateTime, Duration, Utc};

/// A client-scoped accumulation of extracted text chunks. Chunk order is
/// arrival order; merged output joins chunks with newlines.
#[derive(Debug, Clone)]
pub struct Session {
    /// Client-chosen session identifier.
    pub session_id: String,

    /// Extracted text chunks, one per uploaded image, in arrival order.
    pub chunks: Vec<String>,

    /// When the session was created.
    pub created_at: DateTime<Utc>,

    /// When a chunk was last appended.
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create an empty session.
    pub fn new(session_id: String) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            chunks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a chunk and refresh the idle timestamp.
    pub fn push_chunk(&mut self, text: String) {
        self.chunks.push(text);
        self.updated_at = Utc::now();
    }

    /// All chunks newline-joined in arrival order.
    pub fn merged_code(&self) -> String {
        self.chunks.join("\n")
    }

    /// Whether the session has been idle longer than `ttl`.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.updated_at > ttl
    }
}
