//! OpenAI chat-completions provider (second tier, requires an API key)

use super::{http_client, non_empty, send_json, FactCheckProvider, ProviderError, JSON_INSTRUCTIONS};
use crate::config::{credential, OpenAiConfig};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub struct OpenAiProvider {
    http: Client,
    api_key: SecretString,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl OpenAiProvider {
    /// Create a provider; fails with `NotConfigured` when no key is set
    pub fn new(config: &OpenAiConfig, timeout: Duration) -> Result<Self, ProviderError> {
        let api_key = credential(&config.api_key)
            .map(|k| SecretString::new(k.to_string()))
            .ok_or(ProviderError::NotConfigured("openai"))?;

        Ok(Self {
            http: http_client(timeout)?,
            api_key,
            endpoint: format!(
                "{}/v1/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            model: config.model.clone(),
            timeout,
        })
    }
}

#[async_trait]
impl FactCheckProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn source_label(&self) -> &'static str {
        "OpenAI"
    }

    async fn attempt(&self, text: &str) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: format!("You are a fact-checker. {}", JSON_INSTRUCTIONS),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Fact-check: {}", text),
                },
            ],
            max_tokens: Some(300),
            temperature: Some(0.2),
        };

        debug!("Calling OpenAI model {}", self.model);

        let req = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request);

        let response: ChatCompletionResponse = send_json(req, self.timeout).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".to_string()))?;

        non_empty(&choice.message.content)
    }
}

// OpenAI-compatible API types
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
