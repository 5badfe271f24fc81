//! OpenAI-compatible chat-completions provider.

use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::providers::common::{ChatMessage, CompletionRequest, LanguageModel};
use crate::utils::string::{MAX_PREVIEW_LEN, safe_preview};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chat-completions request body.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

/// Chat-completions response body; only the fields this core reads.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Provider speaking the OpenAI-compatible chat-completions protocol.
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        // Short-circuit before any I/O so the caller can substitute its
        // local placeholder reply.
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            Error::MissingCredentials("no API key configured for the language model".to_string())
        })?;

        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
        };

        tracing::debug!(model = %request.model, message_count = request.messages.len(), "calling chat completions");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "chat completions returned {}: {}",
                status,
                safe_preview(&body, MAX_PREVIEW_LEN)
            )));
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Provider("chat completions returned no content".to_string()))?;

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::common::ChatMessage;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 64,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            messages: vec![ChatMessage::user("hello")],
        }
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let provider = OpenAiProvider::new(&LlmConfig {
            api_key: None,
            ..Default::default()
        });

        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, Error::MissingCredentials(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let provider = OpenAiProvider::new(&LlmConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..Default::default()
        });
        assert_eq!(provider.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_request_body_shape() {
        let req = request();
        let body = ChatCompletionRequest {
            model: &req.model,
            messages: &req.messages,
            temperature: req.temperature,
            max_tokens: req.max_tokens,
            top_p: req.top_p,
            frequency_penalty: req.frequency_penalty,
            presence_penalty: req.presence_penalty,
        };

        let rendered = serde_json::to_value(&body).unwrap();
        assert_eq!(rendered["model"], "gpt-4o-mini");
        assert_eq!(rendered["messages"][0]["role"], "user");
        assert_eq!(rendered["max_tokens"], 64);
    }
}
