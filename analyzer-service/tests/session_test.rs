mod common;

use analyzer_service::services::providers::mock::MockTextProvider;
use analyzer_service::services::MockOcr;
use axum::http::StatusCode;
use common::TestApp;
use reqwest::multipart;
use serde_json::json;
use std::sync::Arc;

fn image_part(bytes: &[u8]) -> multipart::Part {
    multipart::Part::bytes(bytes.to_vec())
        .file_name("screenshot.png")
        .mime_str("image/png")
        .unwrap()
}

async fn upload_chunk(app: &TestApp, session_id: &str, bytes: &[u8]) -> reqwest::Response {
    let form = multipart::Form::new()
        .part("image", image_part(bytes))
        .text("session_id", session_id.to_string());

    reqwest::Client::new()
        .post(format!("{}/upload_chunk", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn upload_chunk_reports_extracted_line_count() {
    let app = TestApp::spawn().await;

    // The mock OCR engine echoes the upload bytes as text: two lines here.
    let response = upload_chunk(&app, "lines", b"let a = 1;\nlet b = 2;").await;

    assert_eq!(StatusCode::OK, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "chunk received");
    assert_eq!(body["lines"], 2);
}

#[tokio::test]
async fn upload_then_merge_returns_chunks_in_upload_order() {
    let app = TestApp::spawn().await;

    upload_chunk(&app, "ordered", b"fn main() {").await;
    upload_chunk(&app, "ordered", b"    println!(\"hi\");").await;
    upload_chunk(&app, "ordered", b"}").await;

    let response = reqwest::Client::new()
        .post(format!("{}/get_merged_code", app.address))
        .json(&json!({ "session_id": "ordered" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["code"], "fn main() {\n    println!(\"hi\");\n}");
}

#[tokio::test]
async fn merge_unknown_session_returns_not_found() {
    let app = TestApp::spawn().await;

    let response = reqwest::Client::new()
        .post(format!("{}/get_merged_code", app.address))
        .json(&json!({ "session_id": "never-uploaded" }))
        .send()
        .await
        .expect("Failed to execute request");

    // Not-found, never a 200 with an empty string.
    assert_eq!(StatusCode::NOT_FOUND, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].is_string());
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn reset_then_merge_returns_not_found() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    upload_chunk(&app, "doomed", b"some code").await;

    let response = client
        .post(format!("{}/reset_session", app.address))
        .json(&json!({ "session_id": "doomed" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::OK, response.status());

    let response = client
        .post(format!("{}/get_merged_code", app.address))
        .json(&json!({ "session_id": "doomed" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn reset_unknown_session_reports_success() {
    let app = TestApp::spawn().await;

    let response = reqwest::Client::new()
        .post(format!("{}/reset_session", app.address))
        .json(&json!({ "session_id": "never-uploaded" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "session reset");
}

#[tokio::test]
async fn upload_without_session_id_is_rejected() {
    let app = TestApp::spawn().await;

    let form = multipart::Form::new().part("image", image_part(b"code"));

    let response = reqwest::Client::new()
        .post(format!("{}/upload_chunk", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn upload_surfaces_ocr_failure_as_error_response() {
    let app = TestApp::spawn_with(
        Arc::new(MockOcr::disabled()),
        Arc::new(MockTextProvider::new(true)),
    )
    .await;

    let response = upload_chunk(&app, "failing", b"ignored").await;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].is_string());

    // The process stays up: the same session can still be reset.
    let response = reqwest::Client::new()
        .post(format!("{}/reset_session", app.address))
        .json(&json!({ "session_id": "failing" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::OK, response.status());
}
