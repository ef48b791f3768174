use serde::{Deserialize, Serialize};

/// Body for the session-scoped JSON endpoints (merge, reset).
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct UploadChunkResponse {
    pub status: String,
    /// Number of text lines extracted from the uploaded image.
    pub lines: usize,
}

#[derive(Debug, Serialize)]
pub struct MergedCodeResponse {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ResetSessionResponse {
    pub status: String,
}
