//! LLM provider trait and provider identifiers.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use super::error::LLMError;
use super::types::{ChatRequest, ChatResponse};

/// Trait for the transport that carries a chat completion request.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Make a chat completion request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError>;
}

/// The OpenAI-compatible backend being targeted.
///
/// Only affects how JSON mode is requested; the wire protocol is the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Provider {
    /// No provider configured; treated like OpenAI.
    #[default]
    Unset,
    OpenAI,
    Ollama,
    LmStudio,
    LlamaCpp,
    /// Any other OpenAI-compatible server, by its lowercased name.
    Other(String),
}

impl Provider {
    pub fn as_str(&self) -> &str {
        match self {
            Provider::Unset => "",
            Provider::OpenAI => "openai",
            Provider::Ollama => "ollama",
            Provider::LmStudio => "lm-studio",
            Provider::LlamaCpp => "llamacpp",
            Provider::Other(name) => name,
        }
    }
}

impl From<&str> for Provider {
    fn from(value: &str) -> Self {
        let name = value.trim().to_lowercase();
        match name.as_str() {
            "" => Provider::Unset,
            "openai" => Provider::OpenAI,
            "ollama" => Provider::Ollama,
            "lm-studio" => Provider::LmStudio,
            "llamacpp" => Provider::LlamaCpp,
            _ => Provider::Other(name),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Unset => f.write_str("default"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Provider::from).unwrap_or_default())
    }
}
