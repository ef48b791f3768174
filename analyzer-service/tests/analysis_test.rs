mod common;

use analyzer_service::services::prompts;
use analyzer_service::services::providers::mock::MockTextProvider;
use analyzer_service::services::MockOcr;
use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn explain_code_passes_provider_text_through() {
    let app = TestApp::spawn().await;
    let code = "for i in 0..10 { println!(\"{}\", i); }";

    let response = reqwest::Client::new()
        .post(format!("{}/explain_code", app.address))
        .json(&json!({ "code": code }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    // The mock provider echoes the prompt, so the body pins both the prompt
    // wording and the verbatim pass-through of provider output.
    let expected = format!("Mock response for: {}", prompts::explain_prompt(code));
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["explanation"], expected);
}

#[tokio::test]
async fn debug_code_returns_debug_report() {
    let app = TestApp::spawn().await;
    let code = "while true {}";

    let response = reqwest::Client::new()
        .post(format!("{}/debug_code", app.address))
        .json(&json!({ "code": code }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    let expected = format!("Mock response for: {}", prompts::debug_prompt(code));
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["debug_report"], expected);
}

#[tokio::test]
async fn heatmap_returns_heatmap() {
    let app = TestApp::spawn().await;
    let code = "fn hot() { for _ in 0..1_000_000 {} }";

    let response = reqwest::Client::new()
        .post(format!("{}/heatmap", app.address))
        .json(&json!({ "code": code }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    let expected = format!("Mock response for: {}", prompts::heatmap_prompt(code));
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["heatmap"], expected);
}

#[tokio::test]
async fn ask_embeds_code_and_question() {
    let app = TestApp::spawn().await;
    let code = "fn add(a: i32, b: i32) -> i32 { a + b }";
    let question = "What is the return type?";

    let response = reqwest::Client::new()
        .post(format!("{}/ask", app.address))
        .json(&json!({ "code": code, "question": question }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    let expected = format!("Mock response for: {}", prompts::ask_prompt(code, question));
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["answer"], expected);
}

#[tokio::test]
async fn provider_failure_surfaces_as_error_response() {
    let app = TestApp::spawn_with(
        Arc::new(MockOcr::new()),
        Arc::new(MockTextProvider::new(false)),
    )
    .await;
    let client = reqwest::Client::new();

    for endpoint in ["explain_code", "debug_code", "heatmap"] {
        let response = client
            .post(format!("{}/{}", app.address, endpoint))
            .json(&json!({ "code": "fn main() {}" }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert!(body["error"].is_string());
    }

    // The failure never takes the process down.
    let response = client
        .get(&app.address)
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn compile_reports_exact_character_count() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    // Character count, not byte count: "é" is 1 character, 2 bytes.
    let code = "é = 1";
    let response = client
        .post(format!("{}/compile", app.address))
        .json(&json!({ "code": code }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["output"],
        "Code received. Simulated execution. Length: 5 characters."
    );

    let response = client
        .post(format!("{}/compile", app.address))
        .json(&json!({ "code": "" }))
        .send()
        .await
        .expect("Failed to execute request");

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["output"],
        "Code received. Simulated execution. Length: 0 characters."
    );
}
