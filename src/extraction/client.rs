//! HTTP client for the hosted extraction model.
//!
//! One `generateContent` round trip per upload: the binary payload goes up
//! base64-encoded alongside the instruction text, and a single text response
//! comes back. No streaming, no multi-turn correction, no retry.

use super::error::ExtractionError;
use rand::Rng;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Base URL for the Gemini REST API.
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for document understanding.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the extraction model client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL for the model API
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Deadline for the whole request; a slow model call fails fast instead
    /// of holding the upload request open indefinitely
    pub request_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client with default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ExtractionError> {
        Self::with_config(GeminiConfig::default(), api_key)
    }

    /// Creates a client with custom configuration.
    pub fn with_config(
        config: GeminiConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, ExtractionError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ExtractionError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            config,
            api_key: api_key.into(),
        })
    }

    /// Sends one extraction request and returns the model's raw text.
    ///
    /// # Arguments
    /// * `media_type` - MIME type tagging the payload (e.g. "image/png")
    /// * `payload_b64` - The base64-encoded file bytes
    /// * `prompt` - The instruction text describing the expected JSON shape
    /// * `correlation_id` - Request-scoped ID threaded through log lines
    pub async fn generate(
        &self,
        media_type: &str,
        payload_b64: &str,
        prompt: &str,
        correlation_id: &str,
    ) -> Result<String, ExtractionError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        info!(
            correlation_id = %correlation_id,
            model = %self.config.model,
            media_type = %media_type,
            payload_b64_len = payload_b64.len(),
            "Requesting document extraction"
        );

        let body = json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": media_type, "data": payload_b64 } },
                    { "text": prompt }
                ]
            }]
        });

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(
                correlation_id = %correlation_id,
                status = %status,
                "Model API returned an error"
            );
            return Err(ExtractionError::UnexpectedResponse {
                message: format!("model API returned status {}: {}", status, detail),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ExtractionError::EmptyResponse)?
            .to_string();

        info!(
            correlation_id = %correlation_id,
            duration_ms = start.elapsed().as_millis() as u64,
            response_chars = text.len(),
            "Extraction response received"
        );

        Ok(text)
    }

    /// Maps transport-level failures, keeping timeouts distinct so the
    /// caller can report them as such.
    fn map_request_error(&self, err: reqwest::Error) -> ExtractionError {
        if err.is_timeout() {
            ExtractionError::Timeout {
                timeout_secs: self.config.request_timeout.as_secs(),
            }
        } else {
            ExtractionError::Network {
                message: err.to_string(),
            }
        }
    }
}

/// Generates a unique correlation ID for request tracing.
pub fn generate_correlation_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros();
    let random: u32 = rand::thread_rng().gen();
    format!("{:x}-{:08x}", timestamp & 0xFFFFFFFF, random)
}
