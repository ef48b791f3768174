//! Application startup and lifecycle management.

use crate::config::AnalyzerConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::{OcrEngine, SessionStore, TesseractOcr};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AnalyzerConfig,
    pub sessions: SessionStore,
    pub ocr: Arc<dyn OcrEngine>,
    pub text_provider: Arc<dyn TextProvider>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/upload_chunk", post(handlers::upload_chunk))
        .route("/get_merged_code", post(handlers::get_merged_code))
        .route("/reset_session", post(handlers::reset_session))
        .route("/explain_code", post(handlers::explain_code))
        .route("/debug_code", post(handlers::debug_code))
        .route("/heatmap", post(handlers::heatmap))
        .route("/ask", post(handlers::ask))
        .route("/compile", post(handlers::compile_code))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with production engines (tesseract OCR, Gemini).
    pub async fn build(config: AnalyzerConfig) -> Result<Self, AppError> {
        let ocr: Arc<dyn OcrEngine> = Arc::new(TesseractOcr::new(&config.ocr).await.map_err(
            |e| {
                tracing::error!("Failed to initialize OCR engine: {}", e);
                e
            },
        )?);

        let gemini_config = GeminiConfig {
            api_key: config.google.api_key.clone(),
            model: config.models.text_model.clone(),
        };
        let text_provider: Arc<dyn TextProvider> = Arc::new(GeminiTextProvider::new(gemini_config));

        tracing::info!(
            model = %config.models.text_model,
            "Initialized Gemini text provider"
        );

        let state = AppState {
            config,
            sessions: SessionStore::new(),
            ocr,
            text_provider,
        };

        Self::from_state(state).await
    }

    /// Bind a listener for a pre-built state. Tests use this to inject mock
    /// engines.
    pub async fn from_state(state: AppState) -> Result<Self, AppError> {
        // Port 0 = random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a handle to the session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.state.sessions
    }

    /// Run the application until stopped.
    ///
    /// Spawns the session sweeper alongside the HTTP server.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let sessions = self.state.sessions.clone();
        let ttl = chrono::Duration::seconds(self.state.config.sessions.ttl_seconds as i64);
        let sweep_interval =
            std::time::Duration::from_secs(self.state.config.sessions.sweep_interval_seconds);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweep_interval);
            loop {
                ticker.tick().await;
                let evicted = sessions.evict_expired(ttl);
                if evicted > 0 {
                    tracing::info!(evicted = evicted, "Evicted expired sessions");
                }
            }
        });

        axum::serve(self.listener, build_router(self.state)).await
    }
}
