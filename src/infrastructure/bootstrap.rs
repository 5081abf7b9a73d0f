//! Composition root: turns a [`Config`] into wired adapters and components.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::adapter::outbound::http::HttpMarketApi;
use crate::adapter::outbound::preference::{FilePreferenceStore, MemoryPreferenceStore};
use crate::application::{CardGridLoader, LookbackFetcher, SharedPage, StatusPoller};
use crate::domain::ProviderSelection;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::{MarketApi, PreferenceStore};

/// File name of the provider preference under the marketdeck home.
pub const PREFERENCES_FILE: &str = "preferences.toml";

/// The marketdeck home directory (`~/.marketdeck/`).
#[must_use]
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".marketdeck")
}

/// Build the HTTP API adapter.
///
/// # Errors
///
/// Returns an error if the configured base URL is unusable.
pub fn build_api(config: &Config) -> Result<Arc<dyn MarketApi>> {
    let api = HttpMarketApi::new(&config.api)?;
    debug!(base_url = %api.base_url(), "Market API client ready");
    Ok(Arc::new(api))
}

/// Build the preference store: a TOML file when persistence is on,
/// otherwise process memory.
#[must_use]
pub fn build_preferences(config: &Config) -> Arc<dyn PreferenceStore> {
    if !config.preferences.persist {
        return Arc::new(MemoryPreferenceStore::new());
    }
    let path = config
        .preferences
        .path
        .clone()
        .unwrap_or_else(|| home_dir().join(PREFERENCES_FILE));
    debug!(path = %path.display(), "Using provider preference file");
    Arc::new(FilePreferenceStore::new(path))
}

/// Everything a command needs, wired once.
pub struct Services {
    pub config: Config,
    pub api: Arc<dyn MarketApi>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub page: Arc<SharedPage>,
}

impl Services {
    /// Wire services from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built.
    pub fn from_config(config: Config) -> Result<Self> {
        let api = build_api(&config)?;
        let preferences = build_preferences(&config);
        Ok(Self::new(config, api, preferences))
    }

    /// Wire services around existing adapters.
    #[must_use]
    pub fn new(
        config: Config,
        api: Arc<dyn MarketApi>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            config,
            api,
            preferences,
            page: Arc::new(SharedPage::default()),
        }
    }

    /// Resolve the ambient provider: `explicit`, then the stored
    /// preference, then the configured default.
    #[must_use]
    pub fn provider(&self, explicit: Option<&str>) -> ProviderSelection {
        let stored = self.preferences.provider();
        ProviderSelection::resolve(
            explicit,
            stored.as_ref().map(|key| key.as_str()),
            &self.config.preferences.default_provider,
        )
    }

    #[must_use]
    pub fn status_poller(&self) -> StatusPoller {
        StatusPoller::new(
            Arc::clone(&self.api),
            Arc::clone(&self.page),
            self.config.poller.interval(),
        )
    }

    #[must_use]
    pub fn lookback_fetcher(&self) -> LookbackFetcher {
        LookbackFetcher::new(Arc::clone(&self.api), Arc::clone(&self.page))
    }

    #[must_use]
    pub fn card_grid_loader(&self) -> CardGridLoader {
        CardGridLoader::new(Arc::clone(&self.api), Arc::clone(&self.page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProviderKey, ProviderSource};

    #[test]
    fn memory_store_when_persistence_disabled() {
        let mut config = Config::default();
        config.preferences.persist = false;
        let store = build_preferences(&config);
        assert_eq!(store.provider(), None);
        store.set_provider(&ProviderKey::new("fmp")).unwrap();
        assert_eq!(store.provider(), Some(ProviderKey::new("fmp")));
    }

    #[test]
    fn provider_resolution_uses_stored_preference() {
        let config = Config::default();
        let api = build_api(&config).unwrap();
        let preferences: Arc<dyn PreferenceStore> =
            Arc::new(MemoryPreferenceStore::with_provider("polygon"));
        let services = Services::new(config, api, preferences);

        let selection = services.provider(None);
        assert_eq!(selection.key.as_str(), "polygon");
        assert_eq!(selection.source, ProviderSource::Stored);

        let selection = services.provider(Some("fmp"));
        assert_eq!(selection.source, ProviderSource::Explicit);
    }

    #[test]
    fn home_dir_is_marketdeck() {
        assert!(home_dir().to_string_lossy().contains(".marketdeck"));
    }
}
