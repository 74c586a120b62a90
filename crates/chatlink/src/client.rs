//! Chat completion client with JSON-mode fallback and bounded retries.
//!
//! Each call to [`ChatClient::complete`] runs up to [`MAX_ATTEMPTS`] attempts:
//! 1. Send the request, with the provider's JSON-mode field if enabled
//! 2. On the first attempt only, if JSON mode was on, resend once without it
//! 3. On failure, move to the next attempt until the budget is spent
//! 4. On success, extract the first choice's content and total token usage

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::llm::{
    ChatRequest, ChatResponse, JsonModeStrategy, LLMError, LLMProvider, Message,
    OpenAICompatibleProvider,
};

/// Attempts per logical request: one initial call plus three retries.
pub const MAX_ATTEMPTS: u32 = 4;

/// Generated text and token usage from a completed request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// First choice's message content; empty if the provider sent none.
    pub content: String,
    /// Total tokens reported by the provider; zero if not reported.
    pub total_tokens: u64,
}

/// Terminal failure of a logical request.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("conversation has no messages")]
    EmptyConversation,

    #[error("chat completion failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: LLMError,
    },
}

/// Client for one configured OpenAI-compatible provider.
pub struct ChatClient {
    provider: Arc<dyn LLMProvider>,
    model: String,
    json_mode: Option<JsonModeStrategy>,
}

impl ChatClient {
    /// Build a client with its own HTTP transport from `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, LLMError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;
        let provider = OpenAICompatibleProvider::new(
            http,
            settings.base_url.clone(),
            Some(settings.api_key.clone()),
        );
        Ok(Self::new(Arc::new(provider), settings))
    }

    /// Build a client over an existing transport.
    pub fn new(provider: Arc<dyn LLMProvider>, settings: &Settings) -> Self {
        let json_mode = settings
            .json_mode
            .then(|| JsonModeStrategy::for_provider(&settings.provider));
        Self {
            provider,
            model: settings.model.clone(),
            json_mode,
        }
    }

    /// The request payload `complete` sends on its first attempt.
    pub fn build_request(&self, messages: &[Message]) -> ChatRequest {
        let mut request = ChatRequest::new(self.model.clone(), messages.to_vec());
        if let Some(strategy) = self.json_mode {
            strategy.apply(&mut request);
        }
        request
    }

    /// Send `messages` and return the assistant's reply with token usage.
    pub async fn complete(&self, messages: &[Message]) -> Result<Completion, CompletionError> {
        if messages.is_empty() {
            return Err(CompletionError::EmptyConversation);
        }

        let request = self.build_request(messages);
        let mut attempt = 1u32;

        loop {
            debug!(
                attempt,
                model = %request.model,
                messages = %serde_json::to_string(&request.messages).unwrap_or_default(),
                "sending chat completion request"
            );

            let err = match self.send(&request, attempt).await {
                Ok(response) => return Ok(extract(response)),
                Err(e) => e,
            };

            if attempt >= MAX_ATTEMPTS {
                error!(attempt, error = %err, "chat completion retry budget exhausted");
                return Err(CompletionError::RetriesExhausted {
                    attempts: attempt,
                    source: err,
                });
            }

            error!(attempt, error = %err, "chat completion request failed, retrying");
            attempt += 1;
        }
    }

    /// One attempt. The first attempt falls back to a plain request if JSON mode fails.
    async fn send(&self, request: &ChatRequest, attempt: u32) -> Result<ChatResponse, LLMError> {
        match self.provider.chat(request.clone()).await {
            Ok(response) => Ok(response),
            Err(e) if attempt == 1 && request.has_json_mode() => {
                warn!(error = %e, "json mode request failed, retrying without json mode");
                self.provider.chat(request.without_json_mode()).await
            }
            Err(e) => Err(e),
        }
    }
}

fn extract(response: ChatResponse) -> Completion {
    let content = response.content().to_string();
    debug!(content = %content, "received chat completion");

    let total_tokens = match response.total_tokens() {
        Some(tokens) => {
            info!(total_tokens = tokens, "api token usage");
            tokens
        }
        None => {
            info!("api token usage not provided by this provider");
            0
        }
    };

    Completion {
        content,
        total_tokens,
    }
}
