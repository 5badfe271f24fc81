//! Shared provider types and the model trait.

use crate::error::Result;
use crate::models::settings::AssistantSettings;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Conversation participant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A message in a conversation with the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// One completion call: model name, sampling surface, and the messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Build a request from resolved settings and a message list.
    pub fn from_settings(settings: &AssistantSettings, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            top_p: settings.top_p,
            frequency_penalty: settings.frequency_penalty,
            presence_penalty: settings.presence_penalty,
            messages,
        }
    }
}

/// An opaque text-generation collaborator.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a reply for the request, or fail with a provider error.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_settings() {
        let settings = AssistantSettings {
            model: "gpt-4o".to_string(),
            temperature: 0.3,
            max_tokens: 256,
            ..Default::default()
        };

        let request = CompletionRequest::from_settings(
            &settings,
            vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
        );

        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.temperature, 0.3);
        assert_eq!(request.max_tokens, 256);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, ChatRole::System);
    }

    #[test]
    fn test_role_serialization_is_lowercase() {
        let rendered = serde_json::to_string(&ChatRole::Assistant).unwrap();
        assert_eq!(rendered, r#""assistant""#);
    }
}
