//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all client settings.
//! Every section has defaults, so an empty file (or no file at all) yields a
//! working configuration pointed at a local API. `MARKETDECK_API_URL`
//! overrides `api.base_url`.
//!
//! # Example
//!
//! ```no_run
//! use marketdeck::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init(0);
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::adapter::outbound::http::ApiConfig;
use crate::domain::{Symbol, DEFAULT_PROVIDER};
use crate::error::{ConfigError, Result};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "MARKETDECK_API_URL";

/// Provider status polling settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollerConfig {
    /// Seconds between provider status polls.
    #[serde(default = "default_poll_interval_secs")]
    pub interval_secs: u64,
}

const fn default_poll_interval_secs() -> u64 {
    60
}

impl PollerConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval_secs(),
        }
    }
}

/// Default form values for the lookback fetcher.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookbackDefaults {
    /// Comma-separated symbol list.
    #[serde(default = "default_lookback_symbols")]
    pub symbols: String,
    #[serde(default = "default_lookback_days")]
    pub days: u32,
    /// Minutes around the selected time.
    #[serde(default = "default_lookback_window")]
    pub window: u32,
    /// Optional `HH:MM` time of day to inspect.
    #[serde(default)]
    pub time: Option<String>,
}

fn default_lookback_symbols() -> String {
    "ES=F,NQ=F,GC=F".to_string()
}

const fn default_lookback_days() -> u32 {
    10
}

const fn default_lookback_window() -> u32 {
    10
}

impl Default for LookbackDefaults {
    fn default() -> Self {
        Self {
            symbols: default_lookback_symbols(),
            days: default_lookback_days(),
            window: default_lookback_window(),
            time: None,
        }
    }
}

/// Card grid symbol selector.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CardsConfig {
    /// Symbols offered by the selector; the first is loaded on start.
    #[serde(default = "default_card_symbols")]
    pub symbols: Vec<String>,
}

fn default_card_symbols() -> Vec<String> {
    ["ES=F", "NQ=F", "YM=F", "CL=F", "GC=F", "EURUSD=X"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl CardsConfig {
    /// The symbol selected on start.
    #[must_use]
    pub fn initial_symbol(&self) -> Option<Symbol> {
        self.symbols
            .iter()
            .map(Symbol::new)
            .find(|s| !s.as_str().is_empty())
    }
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            symbols: default_card_symbols(),
        }
    }
}

/// Provider preference persistence.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreferencesConfig {
    /// Persist the chosen provider between runs.
    #[serde(default = "default_persist")]
    pub persist: bool,
    /// Preference file; defaults to `~/.marketdeck/preferences.toml`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Provider used when nothing is selected or stored.
    #[serde(default = "default_provider")]
    pub default_provider: String,
}

const fn default_persist() -> bool {
    true
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            persist: default_persist(),
            path: None,
            default_provider: default_provider(),
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Market-data API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Provider status polling.
    #[serde(default)]
    pub poller: PollerConfig,

    /// Lookback form defaults.
    #[serde(default)]
    pub lookback: LookbackDefaults,

    /// Card grid selector.
    #[serde(default)]
    pub cards: CardsConfig,

    /// Provider preference persistence.
    #[serde(default)]
    pub preferences: PreferencesConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies environment overrides before validating.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// `required` makes a missing file an error; used when the operator
    /// passed `--config` explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is invalid, or is required
    /// and missing.
    pub fn load_or_default<P: AsRef<Path>>(path: P, required: bool) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() || required {
            return Self::load(path);
        }
        Self::parse_toml("")
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api.base_url",
            }
            .into());
        }
        if let Err(e) = url::Url::parse(self.api.base_url.trim()) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url",
                reason: e.to_string(),
            }
            .into());
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        for (field, path) in self.api.endpoints.entries() {
            if path.trim().is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
        }
        if self.poller.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poller.interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.lookback.days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "lookback.days",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.lookback.window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "lookback.window",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.cards.initial_symbol().is_none() {
            return Err(ConfigError::MissingField {
                field: "cards.symbols",
            }
            .into());
        }
        if self.preferences.default_provider.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "preferences.default_provider",
            }
            .into());
        }
        Ok(())
    }

    /// Non-fatal issues worth surfacing in `config validate`.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.poller.interval_secs < 10 {
            warnings.push(format!(
                "poller.interval_secs = {} polls the API very frequently",
                self.poller.interval_secs
            ));
        }
        if self.api.base_url.starts_with("http://")
            && !self.api.base_url.contains("127.0.0.1")
            && !self.api.base_url.contains("localhost")
        {
            warnings.push("api.base_url uses plain HTTP to a remote host".to_string());
        }
        if !self.preferences.persist {
            warnings.push("provider selection will not be remembered between runs".to_string());
        }
        warnings
    }
}
