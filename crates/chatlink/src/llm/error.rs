//! LLM error types.

use thiserror::Error;

/// Errors that can occur when making a single chat completion call.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not JSON
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LLMError {
    /// HTTP status reported by the provider, if the call got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            LLMError::Request(e) => e.status().map(|s| s.as_u16()),
            LLMError::Api { status, .. } => Some(*status),
            LLMError::Decode(_) => None,
        }
    }
}
