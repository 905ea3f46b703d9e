//! External fact-check providers
//!
//! Each provider turns input text into a raw reply string; normalization
//! into a [`FactCheckResult`](super::models::FactCheckResult) happens in the
//! orchestrator so every provider is treated uniformly.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

pub mod gemini;
pub mod huggingface;
pub mod openai;

pub use gemini::GeminiProvider;
pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiProvider;

/// Instruction shared by the providers that can return structured JSON
pub(crate) const JSON_INSTRUCTIONS: &str = "Respond with a JSON object containing:\n\
- \"result\": Clear explanation of whether the statement is correct, incorrect, or uncertain\n\
- \"confidence\": Number between 0.0 and 1.0\n\
- \"sources\": Array of source types";

/// Provider error types
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Upstream error: status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response")]
    EmptyResponse,
}

/// A fact-check backend that can be attempted once per request
#[async_trait]
pub trait FactCheckProvider: Send + Sync {
    /// Short identifier used in logs and metrics
    fn name(&self) -> &'static str;

    /// Label used as the source when the reply does not name any
    fn source_label(&self) -> &'static str;

    /// Ask the provider about `text`, returning its raw reply
    async fn attempt(&self, text: &str) -> Result<String, ProviderError>;
}

/// Build the HTTP client used by the providers
pub(crate) fn http_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Request(e.to_string()))
}

/// Send a request and decode a successful JSON body
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    timeout: Duration,
) -> Result<T, ProviderError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ProviderError::Timeout(timeout)
        } else {
            ProviderError::Request(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ProviderError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

/// Reject blank reply text
pub(crate) fn non_empty(text: &str) -> Result<String, ProviderError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(trimmed.to_string())
    }
}
