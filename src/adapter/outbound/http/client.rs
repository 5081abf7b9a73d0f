//! reqwest-backed [`MarketApi`] implementation.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::dto::{provider_statuses, Envelope, ProviderStatusDto};
use super::settings::{ApiConfig, EndpointConfig};
use crate::domain::{DayRecord, LookbackQuery, OverviewCard, ProviderKey, ProviderStatus, Symbol};
use crate::error::{ApiError, ConfigError, Result};
use crate::port::{ApiResult, MarketApi};

const ENDPOINT_PROVIDER_STATUS: &str = "provider_status";
const ENDPOINT_PROVIDERS: &str = "providers";
const ENDPOINT_LOOKBACK: &str = "lookback";
const ENDPOINT_OVERVIEW_CARDS: &str = "overview_cards";

/// HTTP client for the market-data API.
#[derive(Debug, Clone)]
pub struct HttpMarketApi {
    client: Client,
    base_url: Url,
    endpoints: EndpointConfig,
}

impl HttpMarketApi {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut base_url = Url::parse(config.base_url.trim())?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url",
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            }
            .into());
        }
        // Keep any path prefix when joining endpoint paths onto the base.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .user_agent(concat!("marketdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            endpoints: config.endpoints.clone(),
        })
    }

    /// Base URL every endpoint path is joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &'static str, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Transport {
                endpoint,
                detail: format!("invalid endpoint path '{path}': {e}"),
            })
    }

    /// GET `path`, check the envelope status and return the payload field.
    async fn get_payload<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&'static str, String)],
        field: &str,
    ) -> ApiResult<T> {
        let url = self.endpoint_url(endpoint, path)?;
        debug!(endpoint, url = %url, "GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint,
                detail: e.to_string(),
            })?;

        let http_status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Transport {
            endpoint,
            detail: e.to_string(),
        })?;

        let envelope: Envelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !http_status.is_success() => {
                return Err(ApiError::Transport {
                    endpoint,
                    detail: format!("HTTP {http_status}"),
                });
            }
            Err(e) => {
                return Err(ApiError::Decode {
                    endpoint,
                    detail: e.to_string(),
                });
            }
        };

        if !envelope.is_success() || !http_status.is_success() {
            let message = envelope.failure_message(http_status.as_u16());
            info!(endpoint, status = http_status.as_u16(), message = %message, "API reported failure");
            return Err(ApiError::Application { endpoint, message });
        }

        envelope.into_payload(endpoint, field)
    }
}

#[async_trait]
impl MarketApi for HttpMarketApi {
    async fn provider_status(&self) -> ApiResult<Vec<ProviderStatus>> {
        let map: BTreeMap<String, ProviderStatusDto> = self
            .get_payload(
                ENDPOINT_PROVIDER_STATUS,
                &self.endpoints.provider_status,
                &[],
                "providers",
            )
            .await?;
        Ok(provider_statuses(map))
    }

    async fn providers(&self) -> ApiResult<Vec<ProviderKey>> {
        let keys: Vec<String> = self
            .get_payload(ENDPOINT_PROVIDERS, &self.endpoints.providers, &[], "providers")
            .await?;
        Ok(keys.into_iter().map(ProviderKey::new).collect())
    }

    async fn lookback(&self, query: &LookbackQuery) -> ApiResult<BTreeMap<String, Vec<DayRecord>>> {
        self.get_payload(
            ENDPOINT_LOOKBACK,
            &self.endpoints.lookback,
            &query.to_query_pairs(),
            "data",
        )
        .await
    }

    async fn overview_cards(&self, symbol: &Symbol, days: u32) -> ApiResult<Vec<OverviewCard>> {
        let query = [
            ("symbols", symbol.to_string()),
            ("days", days.to_string()),
        ];
        let mut data: BTreeMap<String, Vec<OverviewCard>> = self
            .get_payload(
                ENDPOINT_OVERVIEW_CARDS,
                &self.endpoints.overview_cards,
                &query,
                "data",
            )
            .await?;
        Ok(data.remove(symbol.as_str()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn endpoint_paths_join_onto_base() {
        let api = HttpMarketApi::new(&config("http://localhost:5000")).unwrap();
        let url = api
            .endpoint_url(ENDPOINT_LOOKBACK, "/ict/lookback")
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/ict/lookback");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let api = HttpMarketApi::new(&config("https://example.com/finbot")).unwrap();
        assert_eq!(api.base_url().as_str(), "https://example.com/finbot/");
        let url = api
            .endpoint_url(ENDPOINT_PROVIDER_STATUS, "/api/providers/status")
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/finbot/api/providers/status");
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = HttpMarketApi::new(&config("ftp://example.com")).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }
}
