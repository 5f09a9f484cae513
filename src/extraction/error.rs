//! Error types for the document extraction subsystem.

use thiserror::Error;

/// Errors that can occur while extracting structured data from an upload.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Network/HTTP request to the model API failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// The model call exceeded the configured deadline
    #[error("Extraction timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The model API returned an unexpected status or body
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    /// The model API returned a response with no candidate text
    #[error("Model response contained no text")]
    EmptyResponse,

    /// The model's text output was not valid JSON after normalization
    #[error("Malformed extraction output: {message}")]
    Malformed { message: String },
}

impl ExtractionError {
    /// Returns true if the failure happened before any text was produced,
    /// i.e. the model call itself failed rather than its output.
    pub fn is_call_failure(&self) -> bool {
        matches!(
            self,
            ExtractionError::Network { .. }
                | ExtractionError::Timeout { .. }
                | ExtractionError::UnexpectedResponse { .. }
        )
    }
}

impl From<serde_json::Error> for ExtractionError {
    fn from(err: serde_json::Error) -> Self {
        ExtractionError::Malformed {
            message: err.to_string(),
        }
    }
}
