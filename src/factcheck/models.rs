//! Data models for fact-check results

use serde::{Deserialize, Serialize};

/// Fallback confidence for provider replies that do not state one
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

/// A single fact-check verdict.
///
/// Built fresh for every request and never stored. `verdict_text` and
/// `sources` are never empty and `confidence` is always within `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResult {
    #[serde(rename = "result")]
    pub verdict_text: String,
    pub confidence: f64,
    pub sources: Vec<String>,
}

impl FactCheckResult {
    pub fn new(verdict_text: impl Into<String>, confidence: f64, sources: Vec<String>) -> Self {
        let confidence = if confidence.is_nan() {
            DEFAULT_CONFIDENCE
        } else {
            confidence.clamp(0.0, 1.0)
        };

        Self {
            verdict_text: verdict_text.into(),
            confidence,
            sources,
        }
    }

    /// Result reported when the fact-check task itself could not complete
    pub fn service_unavailable() -> Self {
        Self::new(
            "All fact-check services are temporarily unavailable. Please try again later.",
            0.0,
            vec!["System Error".to_string()],
        )
    }

    /// Whether all fields satisfy the result invariants
    pub fn is_well_formed(&self) -> bool {
        !self.verdict_text.trim().is_empty()
            && (0.0..=1.0).contains(&self.confidence)
            && !self.sources.is_empty()
    }
}

/// Fact-check request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactCheckRequest {
    #[serde(default)]
    pub text: Option<String>,
}
