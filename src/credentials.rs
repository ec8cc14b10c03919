//! Local credential file (`.env`): plain `KEY=value` lines.
//!
//! The file is read fully into memory, mutated, and rewritten wholesale by
//! writing a sibling temporary file and renaming it over the original. There is
//! no locking; two concurrent `setup-agent` runs can still lose an update.

use crate::error::ApiError;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const API_KEY_VAR: &str = "CLAWPRINT_API_KEY";
pub const API_URL_VAR: &str = "CLAWPRINT_API_URL";

/// Default credential file name, resolved against the workspace root.
pub const DEFAULT_FILE_NAME: &str = ".env";

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    entries: Vec<(String, String)>,
}

impl CredentialStore {
    /// Empty store bound to `path`; nothing is read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Load `<workspace_root>/.env`.
    pub fn load_workspace(workspace_root: &Path) -> Result<Self, ApiError> {
        Self::load(workspace_root.join(DEFAULT_FILE_NAME))
    }

    /// Read the file at `path`. A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ApiError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::new(path));
        }
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ApiError::CredentialStore(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(Self {
            entries: parse_entries(&content),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace `key`, keeping the position of an existing entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite the whole file with the in-memory entries.
    pub fn save(&self) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ApiError::CredentialStore(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let tmp_path = self.temp_path();
        std::fs::write(&tmp_path, render_entries(&self.entries)).map_err(|e| {
            ApiError::CredentialStore(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            ApiError::CredentialStore(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;
        debug!(path = %self.path.display(), entries = self.entries.len(), "Credential file written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
        self.path.with_file_name(format!("{}.tmp", name))
    }
}

/// Parse `KEY=value` lines, splitting on the first `=`.
/// Blank keys or values and `#` comments are skipped.
pub fn parse_entries(content: &str) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
    }
    entries
}

pub fn render_entries(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}
