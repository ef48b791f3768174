use crate::dtos::{
    AskRequest, AskResponse, CodeRequest, CompileResponse, DebugReportResponse, ExplainResponse,
    HeatmapResponse,
};
use crate::services::prompts;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

/// Line-by-line explanation of the submitted code. Provider text is returned
/// verbatim.
pub async fn explain_code(
    State(state): State<AppState>,
    Json(req): Json<CodeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prompt = prompts::explain_prompt(&req.code);
    let response = state.text_provider.generate(&prompt).await.map_err(|e| {
        tracing::error!(error = %e, "Explain generation failed");
        AppError::from(e)
    })?;

    tracing::info!(
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Explanation generated"
    );

    Ok(Json(ExplainResponse {
        explanation: response.text.unwrap_or_default(),
    }))
}

pub async fn debug_code(
    State(state): State<AppState>,
    Json(req): Json<CodeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prompt = prompts::debug_prompt(&req.code);
    let response = state.text_provider.generate(&prompt).await.map_err(|e| {
        tracing::error!(error = %e, "Debug generation failed");
        AppError::from(e)
    })?;

    tracing::info!(
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Debug report generated"
    );

    Ok(Json(DebugReportResponse {
        debug_report: response.text.unwrap_or_default(),
    }))
}

pub async fn heatmap(
    State(state): State<AppState>,
    Json(req): Json<CodeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prompt = prompts::heatmap_prompt(&req.code);
    let response = state.text_provider.generate(&prompt).await.map_err(|e| {
        tracing::error!(error = %e, "Heatmap generation failed");
        AppError::from(e)
    })?;

    tracing::info!(
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Heatmap generated"
    );

    Ok(Json(HeatmapResponse {
        heatmap: response.text.unwrap_or_default(),
    }))
}

pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prompt = prompts::ask_prompt(&req.code, &req.question);
    let response = state.text_provider.generate(&prompt).await.map_err(|e| {
        tracing::error!(error = %e, "Answer generation failed");
        AppError::from(e)
    })?;

    tracing::info!(
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Answer generated"
    );

    Ok(Json(AskResponse {
        answer: response.text.unwrap_or_default(),
    }))
}

/// Stub: acknowledges the submission without executing anything. The reported
/// length is the exact character count of the input.
pub async fn compile_code(Json(req): Json<CodeRequest>) -> impl IntoResponse {
    let length = req.code.chars().count();

    Json(CompileResponse {
        output: format!(
            "Code received. Simulated execution. Length: {} characters.",
            length
        ),
    })
}
