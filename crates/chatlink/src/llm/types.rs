//! Wire types for OpenAI-compatible chat completions.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A chat completion request (OpenAI-compatible format).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    /// Generic JSON mode, understood by OpenAI and most compatible servers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    /// Extension field used by Ollama-style local servers (`"format": "json"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            response_format: None,
            format: None,
        }
    }

    /// Whether any JSON-mode field is set on this request.
    pub fn has_json_mode(&self) -> bool {
        self.response_format.is_some() || self.format.is_some()
    }

    /// Copy of this request with every JSON-mode field removed.
    pub fn without_json_mode(&self) -> Self {
        Self {
            response_format: None,
            format: None,
            ..self.clone()
        }
    }
}

/// Value of the `response_format` request field.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonObject,
}

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A chat completion response.
///
/// Every field tolerates absence or a wrong shape. Local servers omit `usage`
/// and occasionally return `null` content, and neither should fail the call.
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub choices: Vec<Choice>,
    #[serde(default, deserialize_with = "lenient")]
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Content of the first choice, or an empty string.
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .unwrap_or_default()
    }

    /// Total tokens reported by the provider, if any.
    pub fn total_tokens(&self) -> Option<u64> {
        self.usage.as_ref().and_then(|u| u.total_tokens)
    }
}

/// A single completion choice.
#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    #[serde(default, deserialize_with = "lenient")]
    pub index: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<ResponseMessage>,
    #[serde(default, deserialize_with = "lenient")]
    pub finish_reason: Option<String>,
}

/// Assistant message as returned by the provider.
#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Default, Deserialize)]
pub struct Usage {
    #[serde(default, deserialize_with = "lenient")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub completion_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_tokens: Option<u64>,
}

/// Deserialize `T`, falling back to its default when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatRequest::new(
            "llama3.1:8b",
            vec![
                Message::system("You are a helpful assistant."),
                Message::user("Hello!"),
            ],
        );

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"llama3.1:8b\""));
        assert!(json.contains("\"role\":\"system\""));
        assert!(json.contains("\"role\":\"user\""));
        assert!(!json.contains("response_format"));
        assert!(!json.contains("\"format\""));
    }

    #[test]
    fn test_response_format_serialization() {
        let mut request = ChatRequest::new("gpt-4o-mini", vec![Message::user("Hi")]);
        request.response_format = Some(ResponseFormat::JsonObject);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"], serde_json::json!({"type": "json_object"}));
        assert!(request.has_json_mode());
    }

    #[test]
    fn test_without_json_mode_strips_both_fields() {
        let mut request = ChatRequest::new("m", vec![Message::user("Hi")]);
        request.response_format = Some(ResponseFormat::JsonObject);
        request.format = Some("json".to_string());

        let stripped = request.without_json_mode();
        assert!(!stripped.has_json_mode());
        assert_eq!(stripped.model, request.model);
        assert_eq!(stripped.messages, request.messages);
    }

    #[test]
    fn test_chat_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "choices": [
                {
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": "Hello! How can I help you today?"
                    },
                    "finish_reason": "stop"
                }
            ],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 8,
                "total_tokens": 18
            }
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id.as_deref(), Some("chatcmpl-123"));
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(
            response.choices[0].message.as_ref().unwrap().role,
            Some(Role::Assistant)
        );
        assert_eq!(response.content(), "Hello! How can I help you today?");
        assert_eq!(response.total_tokens(), Some(18));
    }

    #[test]
    fn test_chat_response_without_usage() {
        let json = r#"{
            "id": "chatcmpl-456",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "Response"},
                    "finish_reason": null
                }
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(response.usage.is_none());
        assert_eq!(response.total_tokens(), None);
        assert_eq!(response.content(), "Response");
    }

    #[test]
    fn test_chat_response_tolerates_malformed_shapes() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices": "nope", "usage": 7}"#).unwrap();
        assert_eq!(response.content(), "");
        assert_eq!(response.total_tokens(), None);

        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": null}}], "usage": {"total_tokens": null}}"#,
        )
        .unwrap();
        assert_eq!(response.content(), "");
        assert_eq!(response.total_tokens(), None);

        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.content(), "");
    }

    #[test]
    fn test_message_roles() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );

        assert_eq!(
            serde_json::from_str::<Role>("\"assistant\"").unwrap(),
            Role::Assistant
        );
        assert_eq!(Message::assistant("ok").role, Role::Assistant);
    }
}
