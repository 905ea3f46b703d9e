//! Service configuration
//!
//! Layered as: built-in defaults, then an optional TOML file, then
//! `FACTCHECK__`-prefixed environment variables, then the conventional
//! unprefixed variables (`GEMINI_API_KEY`, `OPENAI_API_KEY`, `DATABASE_URL`,
//! `PORT`, `HOST`).

use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Page storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Fact-check provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// Per-attempt timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_gemini_url")]
    pub base_url: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_openai_url")]
    pub base_url: String,

    #[serde(default = "default_openai_model")]
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HuggingFaceConfig {
    /// The credential-free tier; disabling it leaves only the heuristic
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_huggingface_url")]
    pub base_url: String,

    #[serde(default = "default_huggingface_model")]
    pub model: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// One of `json`, `pretty`, `compact`
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_max_body_bytes() -> usize { 2 * 1024 * 1024 }
fn default_database_url() -> String { "sqlite:fact_check_editor.db?mode=rwc".to_string() }
fn default_max_connections() -> u32 { 5 }
fn default_provider_timeout() -> u64 { 30 }
fn default_gemini_url() -> String { "https://generativelanguage.googleapis.com".to_string() }
fn default_gemini_model() -> String { "gemini-1.5-flash".to_string() }
fn default_openai_url() -> String { "https://api.openai.com".to_string() }
fn default_openai_model() -> String { "gpt-3.5-turbo".to_string() }
fn default_enabled() -> bool { true }
fn default_huggingface_url() -> String { "https://api-inference.huggingface.co".to_string() }
fn default_huggingface_model() -> String { "microsoft/DialoGPT-medium".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_provider_timeout(),
            gemini: GeminiConfig::default(),
            openai: OpenAiConfig::default(),
            huggingface: HuggingFaceConfig::default(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_url(),
            model: default_gemini_model(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_url(),
            model: default_openai_model(),
        }
    }
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_huggingface_url(),
            model: default_huggingface_model(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from `FACTCHECK_CONFIG` (default `config.toml`),
    /// the environment and a `.env` file if present
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var("FACTCHECK_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        let config = Self::from_file(&path)?.from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file (missing file is allowed) layered
    /// under `FACTCHECK__` environment variables
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("FACTCHECK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize().map_err(Error::from)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would leave the service unusable
    pub fn validate(&self) -> Result<()> {
        self.providers.validate()
    }

    /// Apply the conventional unprefixed environment variables
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("GEMINI_API_KEY") {
            self.providers.gemini.api_key = Some(SecretString::new(val));
        }

        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            self.providers.openai.api_key = Some(SecretString::new(val));
        }

        if let Ok(val) = std::env::var("DATABASE_URL") {
            self.database.url = val;
        }

        if let Ok(val) = std::env::var("HOST") {
            self.server.host = val;
        }

        if let Ok(val) = std::env::var("PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }

        self
    }
}

impl ProvidersConfig {
    /// Get the per-attempt timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// A zero timeout would fail every provider before it is called
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "providers.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Returns the credential only when it is present and non-blank
pub(crate) fn credential(key: &Option<SecretString>) -> Option<&str> {
    key.as_ref()
        .map(|k| k.expose_secret().as_str())
        .filter(|k| !k.trim().is_empty())
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        credential(&self.api_key).is_some()
    }
}

impl OpenAiConfig {
    pub fn is_configured(&self) -> bool {
        credential(&self.api_key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.providers.timeout_secs, 30);
        assert_eq!(config.providers.timeout(), Duration::from_secs(30));
        assert!(config.providers.huggingface.enabled);
        assert!(!config.providers.gemini.is_configured());
        assert!(!config.providers.openai.is_configured());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_from_toml() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 9100

            [providers]
            timeout_secs = 5

            [providers.gemini]
            api_key = "gm-test"

            [providers.huggingface]
            enabled = false

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.providers.timeout_secs, 5);
        assert!(config.providers.gemini.is_configured());
        assert_eq!(config.providers.gemini.model, "gemini-1.5-flash");
        assert!(!config.providers.huggingface.enabled);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_blank_credential_is_absent() {
        let gemini = GeminiConfig {
            api_key: Some(SecretString::new("   ".to_string())),
            ..Default::default()
        };
        assert!(!gemini.is_configured());
    }

    #[test]
    fn test_zero_provider_timeout_is_rejected() {
        let result = Config::from_toml(
            r#"
            [providers]
            timeout_secs = 0
            "#,
        );
        assert!(matches!(result, Err(Error::Config(_))));

        let providers = ProvidersConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(providers.validate().is_err());
        assert!(ProvidersConfig::default().validate().is_ok());
    }
}
