use analyzer_service::config::AnalyzerConfig;
use analyzer_service::services::providers::mock::MockTextProvider;
use analyzer_service::services::providers::TextProvider;
use analyzer_service::services::{MockOcr, OcrEngine, SessionStore};
use analyzer_service::startup::{AppState, Application};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Spawn the app with the default mock engines: OCR echoes the uploaded
    /// bytes as text, the text provider echoes the prompt.
    pub async fn spawn() -> Self {
        Self::spawn_with(
            Arc::new(MockOcr::new()),
            Arc::new(MockTextProvider::new(true)),
        )
        .await
    }

    /// Spawn the app with explicit engines, for error-path tests.
    pub async fn spawn_with(
        ocr: Arc<dyn OcrEngine>,
        text_provider: Arc<dyn TextProvider>,
    ) -> Self {
        std::env::set_var("APP__PORT", "0"); // Random port for testing
        std::env::set_var("GOOGLE_API_KEY", "test-api-key");

        let mut config = AnalyzerConfig::load().expect("Failed to load configuration");
        config.common.port = 0;

        let state = AppState {
            config,
            sessions: SessionStore::new(),
            ocr,
            text_provider,
        };

        let app = Application::from_state(state)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint.
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
