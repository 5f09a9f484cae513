//! Environment-driven application configuration.

use std::env;
use std::time::Duration;
use tracing::info;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to bind the HTTP server to
    pub host: String,
    /// Port to bind the HTTP server to
    pub port: u16,
    /// Path to the SQLite database file
    pub db_path: String,
    /// API key for the extraction model
    pub gemini_api_key: String,
    /// Model identifier override
    pub gemini_model: Option<String>,
    /// Extraction request deadline override, in seconds
    pub extraction_timeout: Option<Duration>,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// `GEMINI_API_KEY` is required; everything else has a default:
    /// `HOST` (127.0.0.1), `PORT` (8081), `TICKTER_DB_PATH` (tickter.db),
    /// `GEMINI_MODEL`, `EXTRACTION_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingVar("GEMINI_API_KEY"))?;

        let host = env_or("HOST", "127.0.0.1");
        let port = env_parsed("PORT", 8081)?;
        let db_path = env_or("TICKTER_DB_PATH", "tickter.db");
        let gemini_model = env::var("GEMINI_MODEL").ok();
        let extraction_timeout = match env::var("EXTRACTION_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse().map_err(|_| {
                ConfigError::InvalidVar("EXTRACTION_TIMEOUT_SECS")
            })?)),
            Err(_) => None,
        };

        info!(host = %host, port, db_path = %db_path, "Configuration loaded");

        Ok(Self {
            host,
            port,
            db_path,
            gemini_api_key,
            gemini_model,
            extraction_timeout,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn env_parsed<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar(key)),
        Err(_) => Ok(default),
    }
}

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Environment variable {0} has an invalid value")]
    InvalidVar(&'static str),
}
