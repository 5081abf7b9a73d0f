//! In-memory preference store.

use parking_lot::RwLock;

use crate::domain::ProviderKey;
use crate::error::Result;
use crate::port::PreferenceStore;

/// Preference store that lives only for the current process.
///
/// Used when `preferences.persist` is off and in tests.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    provider: RwLock<Option<ProviderKey>>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_provider(provider: impl Into<ProviderKey>) -> Self {
        Self {
            provider: RwLock::new(Some(provider.into())),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn provider(&self) -> Option<ProviderKey> {
        self.provider.read().clone()
    }

    fn set_provider(&self, provider: &ProviderKey) -> Result<()> {
        *self.provider.write() = Some(provider.clone());
        Ok(())
    }
}
