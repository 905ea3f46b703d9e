//! Fact-check annotations for text snippets
//!
//! - Ordered provider chain (Gemini, OpenAI, Hugging Face)
//! - Uniform normalization of provider replies
//! - Rule-based heuristic classifier as the final fallback

pub mod handlers;
pub mod heuristic;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod service;

pub use handlers::{fact_check, FactCheckState};
pub use heuristic::HeuristicClassifier;
pub use models::{FactCheckRequest, FactCheckResult};
pub use providers::{FactCheckProvider, ProviderError};
pub use service::FactCheckService;
