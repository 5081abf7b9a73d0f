//! TOML file preference store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::ProviderKey;
use crate::error::{Error, Result};
use crate::port::PreferenceStore;

#[derive(Debug, Default, Deserialize, Serialize)]
struct PreferenceFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provider: Option<String>,
}

/// Preferences persisted in a small TOML file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<PreferenceFile> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cannot read preferences");
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed preferences");
                None
            }
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn provider(&self) -> Option<ProviderKey> {
        self.read()
            .and_then(|file| file.provider)
            .map(ProviderKey::new)
            .filter(|key| !key.is_empty())
    }

    fn set_provider(&self, provider: &ProviderKey) -> Result<()> {
        let mut file = self.read().unwrap_or_default();
        file.provider = Some(provider.to_string());
        let content =
            toml::to_string(&file).map_err(|e| Error::Preference(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), provider = %provider, "Stored provider preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_has_no_provider() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("preferences.toml"));
        assert_eq!(store.provider(), None);
    }

    #[test]
    fn provider_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("nested/preferences.toml"));
        store.set_provider(&ProviderKey::new("Polygon")).unwrap();
        assert_eq!(store.provider(), Some(ProviderKey::new("polygon")));
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "provider = [").unwrap();
        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.provider(), None);
        store.set_provider(&ProviderKey::new("fmp")).unwrap();
        assert_eq!(store.provider(), Some(ProviderKey::new("fmp")));
    }
}
