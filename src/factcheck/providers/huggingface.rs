//! Hugging Face inference provider (third tier, no credential needed)

use super::{http_client, non_empty, send_json, FactCheckProvider, ProviderError};
use crate::config::HuggingFaceConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

pub struct HuggingFaceProvider {
    http: Client,
    endpoint: String,
    timeout: Duration,
}

impl HuggingFaceProvider {
    pub fn new(config: &HuggingFaceConfig, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(timeout)?,
            endpoint: format!(
                "{}/models/{}",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            timeout,
        })
    }

    fn build_prompt(text: &str) -> String {
        format!(
            "Fact-check: {}. Is this statement correct, incorrect, or uncertain? Explain briefly.",
            text
        )
    }

    /// Pull the generated text out of the inference response, dropping an
    /// echoed prompt
    fn extract_reply(body: &Value, prompt: &str) -> Result<String, ProviderError> {
        let first = body
            .as_array()
            .and_then(|items| items.first())
            .ok_or_else(|| {
                ProviderError::InvalidResponse("Unexpected Hugging Face response format".to_string())
            })?;

        let generated = match first.get("generated_text") {
            Some(Value::String(s)) => s.clone(),
            _ => body.to_string(),
        };

        non_empty(&generated.replace(prompt, ""))
    }
}

#[async_trait]
impl FactCheckProvider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn source_label(&self) -> &'static str {
        "Hugging Face AI"
    }

    async fn attempt(&self, text: &str) -> Result<String, ProviderError> {
        let prompt = Self::build_prompt(text);

        debug!("Calling Hugging Face inference endpoint {}", self.endpoint);

        let req = self.http.post(&self.endpoint).json(&json!({ "inputs": prompt }));
        let body: Value = send_json(req, self.timeout).await?;

        Self::extract_reply(&body, &prompt)
    }
}
