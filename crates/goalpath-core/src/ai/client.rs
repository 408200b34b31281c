//! OpenAI-compatible chat-completion client.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::config::AiConfig;
use crate::error::AiError;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
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

/// Sampling parameters sent with each request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Single-attempt client for a `chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl CompletionClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout,
        }
    }

    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns [`AiError::NotConfigured`] when the collaborator is disabled
    /// or has no credentials.
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        if !config.is_configured() {
            return Err(AiError::NotConfigured);
        }
        Ok(Self::new(
            config.endpoint.clone(),
            config.api_key.clone(),
            config.model.clone(),
            config.timeout(),
        ))
    }

    /// Send `messages` and return the first choice's content, or `None`
    /// when the response carries no content.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: Sampling,
    ) -> Result<Option<String>, AiError> {
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": sampling.temperature,
            "max_tokens": sampling.max_tokens,
        });

        tracing::debug!(endpoint = %self.endpoint, messages = messages.len(), "sending completion request");

        let request = async {
            let resp = self
                .http
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let text = resp.text().await.unwrap_or_default();
                return Err(AiError::Status {
                    status: status.as_u16(),
                    body: text,
                });
            }

            let data: serde_json::Value = resp.json().await?;
            if !data["choices"].is_array() {
                return Err(AiError::MalformedResponse(
                    "response has no `choices` array".into(),
                ));
            }
            Ok::<_, AiError>(extract_content(&data))
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(AiError::Timeout(self.timeout)),
        }
    }
}

/// `choices[0].message.content`, treating an empty string as absent.
pub fn extract_content(data: &serde_json::Value) -> Option<String> {
    data["choices"][0]["message"]["content"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
