//! Error types for the fact-check editor service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes returned in API error bodies
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(e.to_string())
    }
}

/// API error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Error {
    /// HTTP status and error code for this error
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code) = self.status();

        // Storage details stay in the logs
        let message = match &self {
            Error::Validation(msg) | Error::NotFound(msg) => msg.clone(),
            Error::Database(e) => {
                error!("Database error: {}", e);
                "Database error".to_string()
            }
            other => {
                error!("Request failed: {}", other);
                other.to_string()
            }
        };

        (status, Json(ApiError::new(code, message))).into_response()
    }
}
