//! Configuration System
//!
//! Client settings (API base URL, API key, timeout) and logging configuration,
//! layered from defaults, a global TOML file, the workspace credential file,
//! the process environment, and finally CLI overrides.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use merge::merge_policy::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL every request path is appended to
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer credential in `<publicKey>:<secretKey>` form
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Constructor-style overrides, highest precedence.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ClientSettings {
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref url) = overrides.api_url {
            self.api_url = url.clone();
        }
        if let Some(ref key) = overrides.api_key {
            self.api_key = Some(key.clone());
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
        self.normalize();
    }

    /// Blank keys count as unset.
    pub(crate) fn normalize(&mut self) {
        if self
            .api_key
            .as_deref()
            .map(|k| k.trim().is_empty())
            .unwrap_or(false)
        {
            self.api_key = None;
        }
        self.api_url = self.api_url.trim().to_string();
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Public half of the API key, safe to display.
    pub fn public_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .and_then(|k| k.split_once(':'))
            .map(|(public, _)| public)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.api_url.is_empty() {
            return Err(ApiError::Config("API URL cannot be empty".to_string()));
        }
        let url = reqwest::Url::parse(&self.api_url)
            .map_err(|e| ApiError::Config(format!("Invalid API URL '{}': {}", self.api_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::Config(format!(
                "API URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ApiError::Config("Timeout must be at least 1 second".to_string()));
        }
        if let Some(ref key) = self.api_key {
            match key.split_once(':') {
                Some((public, secret)) if !public.is_empty() && !secret.is_empty() => {}
                _ => {
                    return Err(ApiError::Config(
                        "API key must have the form <publicKey>:<secretKey>".to_string(),
                    ))
                }
            }
        }
        Ok(())
    }
}
