//! Market-data API port.
//!
//! Defines the read-only interface the view components fetch through.
//! Implementations translate transport details into [`ApiError`] so the
//! components only ever see the two failure kinds they render.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{DayRecord, LookbackQuery, OverviewCard, ProviderKey, ProviderStatus, Symbol};
use crate::error::ApiError;

/// Outcome of a single API call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Read-only client for the market-data JSON API.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; components share one client
/// behind an `Arc` and may have overlapping requests in flight.
///
/// # Errors
///
/// Every method returns [`ApiError::Transport`] when the request cannot
/// complete and [`ApiError::Application`] when the response reports a
/// non-success status.
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Fetch availability for every configured provider.
    async fn provider_status(&self) -> ApiResult<Vec<ProviderStatus>>;

    /// List provider keys the API knows about.
    async fn providers(&self) -> ApiResult<Vec<ProviderKey>>;

    /// Fetch per-day records for each requested symbol, keyed by symbol.
    async fn lookback(&self, query: &LookbackQuery) -> ApiResult<BTreeMap<String, Vec<DayRecord>>>;

    /// Fetch the most recent `days` overview cards for one symbol, in
    /// source order.
    async fn overview_cards(&self, symbol: &Symbol, days: u32) -> ApiResult<Vec<OverviewCard>>;
}
