//! LLM provider client for chat completions.

mod error;
mod json_mode;
mod openai;
mod provider;
mod types;

pub use error::LLMError;
pub use json_mode::JsonModeStrategy;
pub use openai::OpenAICompatibleProvider;
pub use provider::{LLMProvider, Provider};
pub use types::{
    ChatRequest, ChatResponse, Choice, Message, ResponseFormat, ResponseMessage, Role, Usage,
};
