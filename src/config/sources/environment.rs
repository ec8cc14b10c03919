//! Process environment source: CLAWPRINT_API_URL, CLAWPRINT_API_KEY, CLAWPRINT_TIMEOUT_SECS.

use config::builder::DefaultState;
use config::ConfigBuilder;

pub const PREFIX: &str = "CLAWPRINT";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(config::Environment::with_prefix(PREFIX).try_parsing(true))
}
