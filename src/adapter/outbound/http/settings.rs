//! Market-data API connection configuration.

use serde::{Deserialize, Serialize};

/// Base URL used when neither the config file nor the environment sets one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// HTTP settings for the market-data API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the API (paths are joined onto it).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Endpoint paths.
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_ms() -> u64 {
    15_000
}

const fn default_connect_timeout_ms() -> u64 {
    3_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            endpoints: EndpointConfig::default(),
        }
    }
}

/// Paths of the consumed endpoints, relative to `base_url`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    #[serde(default = "default_provider_status_path")]
    pub provider_status: String,
    #[serde(default = "default_providers_path")]
    pub providers: String,
    #[serde(default = "default_lookback_path")]
    pub lookback: String,
    #[serde(default = "default_overview_cards_path")]
    pub overview_cards: String,
}

fn default_provider_status_path() -> String {
    "/api/providers/status".to_string()
}

fn default_providers_path() -> String {
    "/api/providers/".to_string()
}

fn default_lookback_path() -> String {
    "/ict/lookback".to_string()
}

fn default_overview_cards_path() -> String {
    "/ict/market-overview/cards".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            provider_status: default_provider_status_path(),
            providers: default_providers_path(),
            lookback: default_lookback_path(),
            overview_cards: default_overview_cards_path(),
        }
    }
}

impl EndpointConfig {
    /// All paths with their config field names, for validation.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("endpoints.provider_status", self.provider_status.as_str()),
            ("endpoints.providers", self.providers.as_str()),
            ("endpoints.lookback", self.lookback.as_str()),
            ("endpoints.overview_cards", self.overview_cards.as_str()),
        ]
    }
}
