//! Fact-Check Editor
//!
//! Page storage for a rich-text editor plus an AI fact-check endpoint that
//! tries external providers in order and falls back to a local heuristic
//! classifier, so a request never ends without a verdict.

pub mod api;
pub mod config;
pub mod error;
pub mod factcheck;
pub mod logging;
pub mod metrics;
pub mod pages;

pub use config::Config;
pub use error::{Error, Result};
pub use factcheck::{FactCheckResult, FactCheckService};
pub use pages::{Page, PageStore};
