//! Metrics collection for observability

use prometheus::{
    CounterVec, HistogramVec, Opts, Registry,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
};
use std::sync::Arc;
use once_cell::sync::Lazy;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    Arc::new(Metrics::new().expect("Failed to initialize metrics"))
});

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Fact-check metrics
    pub provider_attempts: CounterVec,
    pub provider_duration: HistogramVec,
    pub factcheck_results: CounterVec,

    // Page storage metrics
    pub page_requests: CounterVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        let provider_attempts = register_counter_vec_with_registry!(
            Opts::new(
                "factcheck_provider_attempts_total",
                "Total fact-check provider attempts"
            ),
            &["provider", "outcome"],
            registry
        )?;

        let provider_duration = register_histogram_vec_with_registry!(
            "factcheck_provider_duration_seconds",
            "Fact-check provider call duration in seconds",
            &["provider"],
            registry
        )?;

        let factcheck_results = register_counter_vec_with_registry!(
            Opts::new("factcheck_results_total", "Fact-check results by origin"),
            &["origin"],
            registry
        )?;

        let page_requests = register_counter_vec_with_registry!(
            Opts::new("pages_requests_total", "Total page storage requests"),
            &["operation", "status"],
            registry
        )?;

        Ok(Self {
            registry,
            provider_attempts,
            provider_duration,
            factcheck_results,
            page_requests,
        })
    }

    /// Record a single provider attempt
    pub fn record_provider_attempt(&self, provider: &str, outcome: &str, seconds: f64) {
        self.provider_attempts
            .with_label_values(&[provider, outcome])
            .inc();
        self.provider_duration
            .with_label_values(&[provider])
            .observe(seconds);
    }

    /// Record where a returned fact-check result came from
    pub fn record_result(&self, origin: &str) {
        self.factcheck_results.with_label_values(&[origin]).inc();
    }

    /// Record a page storage request
    pub fn record_page_request(&self, operation: &str, success: bool) {
        let status = if success { "success" } else { "error" };
        self.page_requests
            .with_label_values(&[operation, status])
            .inc();
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}
