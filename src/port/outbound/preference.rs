//! Persisted operator preferences.

use crate::domain::ProviderKey;
use crate::error::Result;

/// Storage for the single persisted preference: the chosen provider.
///
/// Reads never fail; a missing or unreadable store yields `None` so the
/// caller can fall back to its default.
pub trait PreferenceStore: Send + Sync {
    /// Return the stored provider, if any.
    fn provider(&self) -> Option<ProviderKey>;

    /// Persist the chosen provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be written.
    fn set_provider(&self, provider: &ProviderKey) -> Result<()>;
}
