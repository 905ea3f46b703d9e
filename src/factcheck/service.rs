//! Fact-check orchestration across the provider chain
//!
//! Providers are tried once each, in tier order. The first success is
//! normalized and returned; failures are logged and skipped. When the chain
//! is exhausted (or cancelled) the heuristic classifier answers, so every
//! call yields exactly one well-formed result.

use super::heuristic::HeuristicClassifier;
use super::models::FactCheckResult;
use super::normalize::normalize_reply;
use super::providers::{
    FactCheckProvider, GeminiProvider, HuggingFaceProvider, OpenAiProvider, ProviderError,
};
use crate::config::ProvidersConfig;
use crate::error::{Error, Result};
use crate::metrics::METRICS;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Origin label recorded when the heuristic classifier answers
pub const HEURISTIC_ORIGIN: &str = "heuristic";

/// Fact-check service, built once at startup and shared by handlers
pub struct FactCheckService {
    providers: Vec<Arc<dyn FactCheckProvider>>,
    classifier: HeuristicClassifier,
    attempt_timeout: Duration,
}

impl FactCheckService {
    /// Create a service over an explicit, ordered provider list
    pub fn new(providers: Vec<Arc<dyn FactCheckProvider>>, attempt_timeout: Duration) -> Self {
        let classifier = HeuristicClassifier::new();
        classifier.warm_up();

        Self {
            providers,
            classifier,
            attempt_timeout,
        }
    }

    /// Service that always answers from the heuristic classifier
    pub fn heuristic_only() -> Self {
        Self::new(Vec::new(), Duration::from_secs(30))
    }

    /// Build the provider chain from configuration.
    ///
    /// Gemini and OpenAI join the chain only when their keys are present;
    /// Hugging Face is always last unless disabled.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        config.validate()?;
        let timeout = config.timeout();
        let mut providers: Vec<Arc<dyn FactCheckProvider>> = Vec::new();

        info!("Gemini available: {}", config.gemini.is_configured());
        info!("OpenAI available: {}", config.openai.is_configured());
        info!("Hugging Face available: {}", config.huggingface.enabled);

        if config.gemini.is_configured() {
            providers.push(Arc::new(
                GeminiProvider::new(&config.gemini, timeout).map_err(provider_init_error)?,
            ));
        }

        if config.openai.is_configured() {
            providers.push(Arc::new(
                OpenAiProvider::new(&config.openai, timeout).map_err(provider_init_error)?,
            ));
        }

        if config.huggingface.enabled {
            providers.push(Arc::new(
                HuggingFaceProvider::new(&config.huggingface, timeout)
                    .map_err(provider_init_error)?,
            ));
        }

        Ok(Self::new(providers, timeout))
    }

    /// Names of the configured providers, in the order they are tried
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Fact-check `text`. Never fails.
    ///
    /// The caller must pass non-blank text; this is not re-validated here.
    pub async fn fact_check(&self, text: &str) -> FactCheckResult {
        self.fact_check_until(text, std::future::pending()).await
    }

    /// Fact-check `text`, abandoning outstanding provider attempts once
    /// `cancelled` resolves. A cancelled check still returns the heuristic
    /// verdict.
    pub async fn fact_check_until<F>(&self, text: &str, cancelled: F) -> FactCheckResult
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(cancelled);
        info!("Fact-checking {} chars across {} providers", text.len(), self.providers.len());

        for provider in &self.providers {
            let name = provider.name();
            info!("Trying provider {}", name);

            let start = Instant::now();
            let outcome = tokio::select! {
                biased;
                _ = &mut cancelled => None,
                outcome = self.try_provider(provider.as_ref(), text) => Some(outcome),
            };
            let elapsed = start.elapsed().as_secs_f64();

            match outcome {
                Some(Ok(result)) => {
                    METRICS.record_provider_attempt(name, "success", elapsed);
                    METRICS.record_result(name);
                    debug!("Provider {} answered with confidence {}", name, result.confidence);
                    return result;
                }
                Some(Err(e)) => {
                    METRICS.record_provider_attempt(name, "error", elapsed);
                    warn!("Provider {} failed: {}", name, e);
                }
                None => {
                    METRICS.record_provider_attempt(name, "cancelled", elapsed);
                    warn!("Fact-check cancelled while waiting on {}", name);
                    break;
                }
            }
        }

        info!("Falling back to heuristic classifier");
        METRICS.record_result(HEURISTIC_ORIGIN);
        self.classifier.classify(text)
    }

    /// Single bounded attempt against one provider
    async fn try_provider(
        &self,
        provider: &dyn FactCheckProvider,
        text: &str,
    ) -> std::result::Result<FactCheckResult, ProviderError> {
        let reply = tokio::time::timeout(self.attempt_timeout, provider.attempt(text))
            .await
            .map_err(|_| ProviderError::Timeout(self.attempt_timeout))??;

        Ok(normalize_reply(&reply, provider.source_label()))
    }
}

fn provider_init_error(e: ProviderError) -> Error {
    Error::Internal(format!("Failed to create provider: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeminiConfig, HuggingFaceConfig, OpenAiConfig};
    use async_trait::async_trait;
    use secrecy::SecretString;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingProvider {
        name: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FactCheckProvider for FailingProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn source_label(&self) -> &'static str {
            "Failing AI"
        }

        async fn attempt(&self, _text: &str) -> std::result::Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::Request("connection refused".to_string()))
        }
    }

    struct FixedProvider {
        reply: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FactCheckProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn source_label(&self) -> &'static str {
            "Fixed AI"
        }

        async fn attempt(&self, _text: &str) -> std::result::Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    struct HangingProvider;

    #[async_trait]
    impl FactCheckProvider for HangingProvider {
        fn name(&self) -> &'static str {
            "hanging"
        }

        fn source_label(&self) -> &'static str {
            "Hanging AI"
        }

        async fn attempt(&self, _text: &str) -> std::result::Result<String, ProviderError> {
            std::future::pending().await
        }
    }

    fn failing() -> Arc<FailingProvider> {
        failing_named("failing")
    }

    fn failing_named(name: &'static str) -> Arc<FailingProvider> {
        Arc::new(FailingProvider {
            name,
            calls: AtomicUsize::new(0),
        })
    }

    fn fixed(reply: &'static str) -> Arc<FixedProvider> {
        Arc::new(FixedProvider {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_first_success_wins_after_failure() {
        let first = failing();
        let second = fixed(r#"{"result": "Correct.", "confidence": 0.92, "sources": ["Atlas"]}"#);
        let third = fixed("unused");

        let providers: Vec<Arc<dyn FactCheckProvider>> =
            vec![first.clone(), second.clone(), third.clone()];
        let service = FactCheckService::new(providers, Duration::from_secs(5));
        let result = service.fact_check("fire is hot").await;

        assert_eq!(result, FactCheckResult::new("Correct.", 0.92, vec!["Atlas".into()]));
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
        assert_eq!(third.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_recorded_in_metrics() {
        // Name is unique to this test since METRICS is process-wide
        let name = "refusing";
        let errors = || {
            METRICS
                .provider_attempts
                .with_label_values(&[name, "error"])
                .get()
        };
        let before = errors();

        let providers: Vec<Arc<dyn FactCheckProvider>> =
            vec![failing_named(name), fixed("Accurate.")];
        let service = FactCheckService::new(providers, Duration::from_secs(5));
        let result = service.fact_check("fire is hot").await;

        assert_eq!(result.verdict_text, "Accurate.");
        assert_eq!(errors() - before, 1.0);
        assert!(METRICS
            .export_prometheus()
            .contains(r#"provider="refusing""#));
    }

    #[tokio::test]
    async fn test_freeform_reply_is_wrapped_with_provider_label() {
        let providers: Vec<Arc<dyn FactCheckProvider>> = vec![fixed("Mostly accurate.")];
        let service = FactCheckService::new(providers, Duration::from_secs(5));
        let result = service.fact_check("fire is hot").await;

        assert_eq!(result.verdict_text, "Mostly accurate.");
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.sources, vec!["Fixed AI"]);
    }

    #[tokio::test]
    async fn test_all_failures_fall_back_to_heuristic() {
        let providers: Vec<Arc<dyn FactCheckProvider>> = vec![failing(), failing()];
        let service = FactCheckService::new(providers, Duration::from_secs(5));
        let result = service.fact_check("elephants can fly").await;

        assert_eq!(result, HeuristicClassifier::new().classify("elephants can fly"));
        assert_eq!(result.confidence, 0.99);
    }

    #[tokio::test]
    async fn test_timeout_moves_to_next_provider() {
        let providers: Vec<Arc<dyn FactCheckProvider>> =
            vec![Arc::new(HangingProvider), fixed("Accurate.")];
        let service = FactCheckService::new(providers, Duration::from_millis(50));
        let result = service.fact_check("fire is hot").await;

        assert_eq!(result.verdict_text, "Accurate.");
    }

    #[tokio::test]
    async fn test_cancellation_yields_heuristic_result() {
        let next = fixed("unused");
        let providers: Vec<Arc<dyn FactCheckProvider>> =
            vec![Arc::new(HangingProvider), next.clone()];
        let service = FactCheckService::new(providers, Duration::from_secs(30));

        let result = service
            .fact_check_until("xyzzy plugh quux", tokio::time::sleep(Duration::from_millis(10)))
            .await;

        assert_eq!(result.confidence, 0.50);
        assert!(result.verdict_text.starts_with("Uncertain."));
        assert_eq!(next.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_heuristic_only_is_deterministic() {
        let service = FactCheckService::heuristic_only();
        let first = tokio_test::block_on(service.fact_check("the earth is a sphere"));
        let second = tokio_test::block_on(service.fact_check("the earth is a sphere"));

        assert_eq!(first, second);
        assert_eq!(first.confidence, 0.90);
    }

    #[test]
    fn test_chain_order_follows_credentials() {
        let config = ProvidersConfig {
            gemini: GeminiConfig {
                api_key: Some(SecretString::new("gm".to_string())),
                ..Default::default()
            },
            openai: OpenAiConfig {
                api_key: Some(SecretString::new("sk".to_string())),
                ..Default::default()
            },
            ..Default::default()
        };
        let service = FactCheckService::from_config(&config).unwrap();
        assert_eq!(service.provider_names(), vec!["gemini", "openai", "huggingface"]);

        let service = FactCheckService::from_config(&ProvidersConfig::default()).unwrap();
        assert_eq!(service.provider_names(), vec!["huggingface"]);

        let config = ProvidersConfig {
            huggingface: HuggingFaceConfig {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let service = FactCheckService::from_config(&config).unwrap();
        assert!(service.provider_names().is_empty());
    }

    #[test]
    fn test_zero_timeout_config_is_refused() {
        let config = ProvidersConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            FactCheckService::from_config(&config),
            Err(Error::Config(_))
        ));
    }
}
