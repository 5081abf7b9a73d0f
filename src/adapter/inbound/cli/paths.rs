//! Path utilities for marketdeck.
//!
//! All local state lives under `~/.marketdeck/`:
//! - `~/.marketdeck/config.toml` - main configuration
//! - `~/.marketdeck/preferences.toml` - remembered provider

use std::path::PathBuf;

use crate::infrastructure::bootstrap::{self, PREFERENCES_FILE};

/// Returns the marketdeck home directory (`~/.marketdeck/`).
pub fn home_dir() -> PathBuf {
    bootstrap::home_dir()
}

/// Returns the default config file path (`~/.marketdeck/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default preference file path.
pub fn default_preferences() -> PathBuf {
    home_dir().join(PREFERENCES_FILE)
}
