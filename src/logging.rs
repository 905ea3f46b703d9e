//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(&config.level)))
        .map_err(|e| Error::Config(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        "pretty" => builder.pretty().try_init(),
        _ => builder.compact().try_init(),
    };

    installed.map_err(|e| Error::Internal(format!("Failed to install subscriber: {}", e)))
}

fn filter_directives(level: &str) -> String {
    format!("fact_check_editor={level},tower_http={level}")
}
