use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default idle lifetime for a session before the sweeper reclaims it.
const DEFAULT_SESSION_TTL_SECONDS: u64 = 3600;

/// Default interval between eviction sweeps.
const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 60;

/// Default timeout for a single OCR subprocess run.
const DEFAULT_OCR_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub ocr: OcrConfig,
    pub sessions: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model used for all text analysis prompts (e.g., gemini-1.5-flash)
    pub text_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// OCR binary invoked per uploaded image.
    pub command: String,
    /// Recognition language passed to the OCR binary.
    pub language: String,
    /// Directory where uploads are staged for the OCR subprocess.
    pub scratch_path: String,
    /// Per-run subprocess timeout in seconds.
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Sessions idle longer than this are evicted.
    pub ttl_seconds: u64,
    /// How often the background sweeper runs.
    pub sweep_interval_seconds: u64,
}

impl AnalyzerConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(AnalyzerConfig {
            common: common_config,
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
            },
            models: ModelConfig {
                text_model: get_env("ANALYZER_TEXT_MODEL", Some("gemini-1.5-flash"), is_prod)?,
            },
            ocr: OcrConfig {
                command: get_env("OCR_COMMAND", Some("tesseract"), is_prod)?,
                language: get_env("OCR_LANGUAGE", Some("eng"), is_prod)?,
                scratch_path: get_env("OCR_SCRATCH_PATH", Some("scratch"), is_prod)?,
                timeout_seconds: get_env(
                    "OCR_TIMEOUT_SECONDS",
                    Some(&DEFAULT_OCR_TIMEOUT_SECONDS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_OCR_TIMEOUT_SECONDS),
            },
            sessions: SessionConfig {
                ttl_seconds: get_env(
                    "SESSION_TTL_SECONDS",
                    Some(&DEFAULT_SESSION_TTL_SECONDS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_SESSION_TTL_SECONDS),
                sweep_interval_seconds: get_env(
                    "SESSION_SWEEP_INTERVAL_SECONDS",
                    Some(&DEFAULT_SWEEP_INTERVAL_SECONDS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECONDS),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
