//! Free-text translation through an external completion service
//!
//! The translator turns prose into candidate instruction lines. It never
//! surfaces an error to its caller: any failure talking to the service is
//! logged and degrades to an empty list.

use crate::error::TranslateError;
use crate::prompt::{completion_lines, user_message, SYSTEM_PROMPT};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prose -> candidate instruction lines
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate free text; failures yield an empty list
    async fn translate(&self, text: &str) -> Vec<String>;
}

/// Translator used when no completion service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate(&self, text: &str) -> Vec<String> {
        tracing::debug!(chars = text.len(), "translator disabled, dropping free text");
        Vec::new()
    }
}

/// Completion service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Whether free text is sent to the service at all
    pub enabled: bool,
    /// OpenAI-compatible API root (`.../v1`)
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Bearer token, if the service needs one
    pub api_key: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost:11434/v1".to_string(),
            model: "llama3.2".to_string(),
            api_key: None,
            temperature: 0.1,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Translator backed by an OpenAI-compatible `/chat/completions` endpoint
#[derive(Debug, Clone)]
pub struct CompletionTranslator {
    client: reqwest::Client,
    config: TranslatorConfig,
}

impl CompletionTranslator {
    /// Create translator with its own HTTP client
    ///
    /// # Errors
    /// `TranslateError::Client` if the HTTP client cannot be built.
    pub fn new(config: TranslatorConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(TranslateError::Client)?;
        Ok(Self { client, config })
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Ask the service for completion text
    ///
    /// # Errors
    /// Transport failures, non-success statuses and empty replies.
    pub async fn complete(&self, text: &str) -> Result<String, TranslateError> {
        let user = user_message(text);
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: self.config.temperature,
        };

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            request = request.bearer_auth(key);
        }

        let response: ChatResponse = request
            .send()
            .await
            .map_err(TranslateError::Http)?
            .error_for_status()
            .map_err(TranslateError::Http)?
            .json()
            .await
            .map_err(TranslateError::Http)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(TranslateError::EmptyCompletion)
    }
}

#[async_trait]
impl Translator for CompletionTranslator {
    async fn translate(&self, text: &str) -> Vec<String> {
        tracing::info!(model = %self.config.model, "translating free text");
        match self.complete(text).await {
            Ok(content) => {
                let lines = completion_lines(&content);
                tracing::debug!(lines = lines.len(), "completion received");
                lines
            }
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %self.endpoint(), "translation failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let translator = CompletionTranslator::new(TranslatorConfig {
            base_url: "http://localhost:11434/v1/".to_string(),
            ..TranslatorConfig::default()
        })
        .unwrap();
        assert_eq!(
            translator.endpoint(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn request_body_shape() {
        let body = ChatRequest {
            model: "llama3.2",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "s",
                },
                ChatMessage {
                    role: "user",
                    content: "u",
                },
            ],
            temperature: 0.1,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "u");
    }

    #[tokio::test]
    async fn disabled_translator_is_empty() {
        assert!(DisabledTranslator.translate("anything").await.is_empty());
    }
}
