//! Per-provider JSON mode request shaping.

use super::provider::Provider;
use super::types::{ChatRequest, ResponseFormat};

/// How a provider expects JSON output to be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonModeStrategy {
    /// `"response_format": {"type": "json_object"}`
    ResponseFormat,
    /// `"format": "json"` (Ollama-style extension field)
    FormatField,
}

impl JsonModeStrategy {
    /// Pick the strategy for a provider. Unknown providers get `ResponseFormat`.
    pub fn for_provider(provider: &Provider) -> Self {
        match provider {
            Provider::Ollama | Provider::LmStudio | Provider::LlamaCpp => {
                JsonModeStrategy::FormatField
            }
            Provider::Unset | Provider::OpenAI | Provider::Other(_) => {
                JsonModeStrategy::ResponseFormat
            }
        }
    }

    /// Set this strategy's JSON-mode field on `request`.
    pub fn apply(self, request: &mut ChatRequest) {
        match self {
            JsonModeStrategy::ResponseFormat => {
                request.response_format = Some(ResponseFormat::JsonObject);
            }
            JsonModeStrategy::FormatField => {
                request.format = Some("json".to_string());
            }
        }
    }
}
