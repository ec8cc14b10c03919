//! Merge rules: defaults, override order, conflict handling.
//!
//! Sources are layered lowest to highest: defaults, global config file,
//! workspace credential file, process environment. CLI overrides are applied
//! to the deserialized settings afterwards.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("api_url", DEFAULT_API_URL)?
        .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)
}
