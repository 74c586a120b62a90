//! Chatlink - chat completions against OpenAI-compatible providers.
//!
//! Loads connection [`config::Settings`], shapes requests for the configured
//! provider's JSON mode, and retries failed calls a bounded number of times.

pub mod client;
pub mod config;
pub mod llm;

pub use client::{ChatClient, Completion, CompletionError, MAX_ATTEMPTS};
pub use config::{ConfigError, Settings};
