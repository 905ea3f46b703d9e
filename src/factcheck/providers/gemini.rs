//! Gemini `generateContent` provider (first tier, requires an API key)

use super::{http_client, non_empty, send_json, FactCheckProvider, ProviderError, JSON_INSTRUCTIONS};
use crate::config::{credential, GeminiConfig};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub struct GeminiProvider {
    http: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiProvider {
    /// Create a provider; fails with `NotConfigured` when no key is set
    pub fn new(config: &GeminiConfig, timeout: Duration) -> Result<Self, ProviderError> {
        let api_key = credential(&config.api_key)
            .map(|k| SecretString::new(k.to_string()))
            .ok_or(ProviderError::NotConfigured("gemini"))?;

        Ok(Self {
            http: http_client(timeout)?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout,
        })
    }

    fn build_prompt(text: &str) -> String {
        format!(
            "Fact-check this statement: \"{}\"\n\n{}\n\n\
            Example: {{\"result\": \"Correct. Mount Everest is the tallest mountain on Earth at 8,848.86 meters above sea level.\", \"confidence\": 0.95, \"sources\": [\"Geographic Survey\", \"Mountain Records\"]}}",
            text, JSON_INSTRUCTIONS
        )
    }
}

#[async_trait]
impl FactCheckProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn source_label(&self) -> &'static str {
        "Gemini AI"
    }

    async fn attempt(&self, text: &str) -> Result<String, ProviderError> {
        let url = format!("{}/v1/models/{}:generateContent", self.base_url, self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(Self::build_prompt(text)),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 400,
            },
        };

        debug!("Calling Gemini model {}", self.model);

        let req = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.expose_secret().as_str())])
            .json(&request);

        let response: GenerateContentResponse = send_json(req, self.timeout).await?;

        let reply = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| ProviderError::InvalidResponse("No candidates in response".to_string()))?;

        non_empty(&reply)
    }
}

// Gemini API types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}
