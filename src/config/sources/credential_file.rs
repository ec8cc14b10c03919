//! Workspace credential file source: `<workspace>/.env`.
//!
//! Only `CLAWPRINT_*` keys are considered; they map to settings keys the same
//! way process environment variables do.

use crate::credentials::CredentialStore;
use crate::error::ApiError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::Path;

use super::environment::PREFIX;

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    credential_path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ApiError> {
    let store = CredentialStore::load(credential_path)?;
    if store.is_empty() {
        return Ok(builder);
    }

    let prefix = format!("{}_", PREFIX);
    let vars: config::Map<String, String> = store
        .entries()
        .iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(builder.add_source(
        config::Environment::with_prefix(PREFIX)
            .try_parsing(true)
            .source(Some(vars)),
    ))
}
