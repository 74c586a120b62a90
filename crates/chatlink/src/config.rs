use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

use crate::llm::Provider;

/// Template operators copy to create the settings file.
pub const SETTINGS_TEMPLATE: &str = "secret_setting.json.example";

// ============================================================================
// Settings
// ============================================================================

/// Connection settings for the chat completion provider.
///
/// Missing, `null` and empty-string values fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSettings")]
pub struct Settings {
    pub provider: Provider,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub json_mode: bool,
    pub timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        RawSettings::default().into()
    }
}

impl Settings {
    /// Load settings from a JSON file. A missing file is an error.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::Missing {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    provider: Provider,
    #[serde(default, rename = "api-key")]
    api_key: Option<String>,
    #[serde(default, rename = "base-url")]
    base_url: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    json_mode: Option<bool>,
    #[serde(default)]
    timeout_seconds: Option<u64>,
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        Self {
            provider: raw.provider,
            api_key: non_empty(raw.api_key).unwrap_or_else(default_api_key),
            base_url: non_empty(raw.base_url).unwrap_or_else(default_base_url),
            model: non_empty(raw.model).unwrap_or_else(default_model),
            json_mode: raw.json_mode.unwrap_or(false),
            timeout_seconds: raw.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

const DEFAULT_TIMEOUT_SECONDS: u64 = 180;

fn default_api_key() -> String {
    "not-needed".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_model() -> String {
    "llama3.1:8b".to_string()
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "missing settings file {}; copy {} to it and edit values",
        path.display(),
        SETTINGS_TEMPLATE
    )]
    Missing { path: PathBuf },

    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Tests
// ============================================================================
