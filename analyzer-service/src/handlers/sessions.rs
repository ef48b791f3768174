use crate::dtos::{MergedCodeResponse, ResetSessionResponse, SessionRequest, UploadChunkResponse};
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

/// Accepts a multipart form with an `image` file and a `session_id` field,
/// runs OCR on the image and appends the extracted text to the session.
pub async fn upload_chunk(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut image: Option<Vec<u8>> = None;
    let mut mime_type = String::from("application/octet-stream");
    let mut session_id: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("image") => {
                if let Some(content_type) = field.content_type() {
                    mime_type = content_type.to_string();
                }
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read image bytes: {}", e))
                })?;
                image = Some(bytes.to_vec());
            }
            Some("session_id") => {
                let value = field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read session_id: {}", e))
                })?;
                session_id = Some(value);
            }
            _ => {}
        }
    }

    let image =
        image.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing image field")))?;
    let session_id = session_id
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing session_id field")))?;

    let text = state
        .ocr
        .extract_text(&image, &mime_type)
        .await
        .map_err(|e| {
            tracing::error!(session_id = %session_id, error = %e, "OCR extraction failed");
            e
        })?;

    let lines = text.lines().count();
    state.sessions.append_chunk(&session_id, text);

    tracing::info!(
        session_id = %session_id,
        lines = lines,
        image_size = image.len(),
        "Chunk appended to session"
    );

    Ok(Json(UploadChunkResponse {
        status: "chunk received".to_string(),
        lines,
    }))
}

/// Returns the session's chunks newline-joined in arrival order, or 404 when
/// the session holds no chunks.
pub async fn get_merged_code(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let code = state.sessions.merged_code(&req.session_id)?;

    tracing::info!(
        session_id = %req.session_id,
        code_len = code.len(),
        "Merged session code"
    );

    Ok(Json(MergedCodeResponse { code }))
}

/// Drops the session's stored chunks. Idempotent: unknown sessions still
/// report success.
pub async fn reset_session(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> impl IntoResponse {
    let removed = state.sessions.reset(&req.session_id);

    tracing::info!(
        session_id = %req.session_id,
        removed = removed,
        "Session reset"
    );

    Json(ResetSessionResponse {
        status: "session reset".to_string(),
    })
}
