//! OCR engine abstraction and the tesseract-backed implementation.
//!
//! The production engine stages each upload in a scratch directory and shells
//! out to the OCR binary through the shared executor; the extracted text is
//! whatever the tool prints on stdout.

use crate::config::OcrConfig;
use crate::services::executor::CommandExecutor;
use async_trait::async_trait;
use service_core::error::AppError;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use uuid::Uuid;

/// Converts image bytes to text.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn extract_text(&self, image: &[u8], mime_type: &str) -> Result<String, AppError>;
}

/// OCR engine backed by the tesseract CLI.
pub struct TesseractOcr {
    command: String,
    language: String,
    scratch_dir: PathBuf,
    executor: CommandExecutor,
}

impl TesseractOcr {
    pub async fn new(config: &OcrConfig) -> Result<Self, AppError> {
        let scratch_dir = PathBuf::from(&config.scratch_path);
        if !scratch_dir.exists() {
            fs::create_dir_all(&scratch_dir).await?;
        }

        Ok(Self {
            command: config.command.clone(),
            language: config.language.clone(),
            scratch_dir,
            executor: CommandExecutor::new(Duration::from_secs(config.timeout_seconds)),
        })
    }

    fn extension_for(mime_type: &str) -> &'static str {
        match mime_type {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            "image/tiff" => "tif",
            _ => "img",
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn extract_text(&self, image: &[u8], mime_type: &str) -> Result<String, AppError> {
        let file_name = format!("{}.{}", Uuid::new_v4(), Self::extension_for(mime_type));
        let path = self.scratch_dir.join(file_name);

        fs::write(&path, image).await?;

        let path_arg = path.to_string_lossy().to_string();
        let result = self
            .executor
            .execute(
                &self.command,
                &[path_arg.as_str(), "stdout", "-l", self.language.as_str()],
            )
            .await;

        // Scratch file is garbage either way.
        if let Err(e) = fs::remove_file(&path).await {
            tracing::warn!(path = %path_arg, error = %e, "Failed to remove scratch file");
        }

        let output = result.map_err(|e| {
            tracing::error!(mime_type = %mime_type, "OCR extraction failed");
            e
        })?;

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Test engine: "recognizes" the upload by echoing its bytes as UTF-8.
pub struct MockOcr {
    enabled: bool,
}

impl MockOcr {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// An engine whose every extraction fails, for error-path tests.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

impl Default for MockOcr {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrEngine for MockOcr {
    async fn extract_text(&self, image: &[u8], _mime_type: &str) -> Result<String, AppError> {
        if !self.enabled {
            return Err(AppError::InternalError(anyhow::anyhow!(
                "Mock OCR engine not enabled"
            )));
        }

        Ok(String::from_utf8_lossy(image).to_string())
    }
}
