use serde::{Deserialize, Serialize};

/// Body for the single-field code analysis endpoints.
#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub code: String,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct DebugReportResponse {
    pub debug_report: String,
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub heatmap: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct CompileResponse {
    pub output: String,
}
