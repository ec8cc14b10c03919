//! Error types for the Clawprint client and CLI.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the transport, the API client, and the CLI commands.
///
/// Nothing is retried: every variant is terminal for the invocation that produced it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Usage { message: String, usage: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Transport(String),

    #[error("Request timeout after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        body: serde_json::Value,
    },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential store error: {0}")]
    CredentialStore(String),

    #[error("{failed} of {total} checks failed")]
    ChecksFailed {
        report: String,
        failed: usize,
        total: usize,
    },
}

impl ApiError {
    /// Build a usage error; `usage` is printed after the message.
    pub fn usage(message: impl Into<String>, usage: impl Into<String>) -> Self {
        ApiError::Usage {
            message: message.into(),
            usage: usage.into(),
        }
    }

    /// Build a server error from a non-2xx status and its parsed body.
    /// The message is the body's `error` string, falling back to `HTTP <status>`.
    pub fn from_status(status: u16, body: serde_json::Value) -> Self {
        let message = body
            .get("error")
            .and_then(|e| e.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));
        ApiError::Server {
            status,
            message,
            body,
        }
    }

    /// HTTP status code, for server errors only.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}
