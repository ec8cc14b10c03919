//! Config loader: assembles the layered sources and deserializes `ClientSettings`.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{credential_file, environment, global_file};
use super::ClientSettings;
use crate::credentials::DEFAULT_FILE_NAME;
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings for a workspace: defaults, global file, `<workspace>/.env`, environment.
    pub fn load(workspace_root: &Path) -> Result<ClientSettings, ApiError> {
        Self::load_layers(None, &workspace_root.join(DEFAULT_FILE_NAME))
    }

    /// Load settings with an explicit config file in place of the global one.
    pub fn load_from_file(
        config_path: &Path,
        workspace_root: &Path,
    ) -> Result<ClientSettings, ApiError> {
        Self::load_layers(Some(config_path), &workspace_root.join(DEFAULT_FILE_NAME))
    }

    /// Path of the global config file, if a config directory can be resolved.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn load_layers(
        config_path: Option<&Path>,
        credential_path: &Path,
    ) -> Result<ClientSettings, ApiError> {
        let mut builder = builder_with_defaults()?;
        builder = match config_path {
            Some(path) => global_file::add_file(builder, path)?,
            None => global_file::add_to_builder(builder)?,
        };
        builder = credential_file::add_to_builder(builder, credential_path)?;
        builder = environment::add_to_builder(builder);

        let mut settings: ClientSettings = builder.build()?.try_deserialize()?;
        settings.normalize();
        debug!(
            api_url = %settings.api_url,
            api_key_set = settings.api_key_configured(),
            timeout_secs = settings.timeout_secs,
            "Configuration loaded"
        );
        Ok(settings)
    }
}
