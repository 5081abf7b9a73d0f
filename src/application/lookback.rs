//! Lookback fetcher.
//!
//! One explicit trigger, one request. The region shows a loading
//! placeholder right away and is then fully replaced by either the
//! server's error text or the day cards grouped by symbol.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::page::{Content, RegionId, SharedPage};
use super::ViewOutcome;
use crate::domain::{group_by_request, LookbackQuery, RequestGate};
use crate::error::ApiError;
use crate::port::MarketApi;

pub const LOADING_MESSAGE: &str = "Loading lookback data...";
pub const EMPTY_MESSAGE: &str = "No lookback data returned";

/// Fetches lookback records on demand.
pub struct LookbackFetcher {
    api: Arc<dyn MarketApi>,
    page: Arc<SharedPage>,
    gate: RequestGate,
}

impl LookbackFetcher {
    #[must_use]
    pub fn new(api: Arc<dyn MarketApi>, page: Arc<SharedPage>) -> Self {
        Self {
            api,
            page,
            gate: RequestGate::new(),
        }
    }

    /// Fetch and render `query`.
    pub async fn fetch(&self, query: &LookbackQuery) -> ViewOutcome {
        let token = self.gate.issue();
        info!(
            symbols = query.symbols.len(),
            days = query.days,
            provider = %query.provider,
            "Fetching lookback"
        );

        self.page.update(RegionId::Lookback, |region| {
            region.set(Content::Loading {
                message: LOADING_MESSAGE.to_string(),
            });
        });

        let result = self.api.lookback(query).await;

        if !self.gate.is_current(token) {
            debug!(token = token.sequence(), "Discarding stale lookback response");
            return ViewOutcome::Stale;
        }

        let (content, outcome) = match result {
            Ok(data) if data.is_empty() => (
                Content::Empty {
                    message: EMPTY_MESSAGE.to_string(),
                },
                ViewOutcome::Empty,
            ),
            Ok(data) => {
                let groups = group_by_request(&query.symbols, data);
                let days: usize = groups.iter().map(|g| g.days.len()).sum();
                debug!(groups = groups.len(), days, "Lookback rendered");
                (Content::Lookback { groups }, ViewOutcome::Rendered)
            }
            Err(e) => {
                warn!(error = %e, "Lookback failed");
                (
                    Content::Error {
                        message: error_message(&e),
                    },
                    ViewOutcome::Failed,
                )
            }
        };

        let committed = self
            .page
            .update_if(RegionId::Lookback, || self.gate.is_current(token), |region| {
                region.set(content);
            });
        if committed.is_none() {
            debug!(token = token.sequence(), "Newer request committed first, dropping response");
            return ViewOutcome::Stale;
        }
        outcome
    }
}

/// Text shown inline for a failed lookback.
///
/// Application failures show the server's own error text unchanged.
#[must_use]
pub fn error_message(error: &ApiError) -> String {
    match error {
        ApiError::Application { message, .. } => message.clone(),
        ApiError::Transport { detail, .. } | ApiError::Decode { detail, .. } => {
            format!("Request failed: {detail}")
        }
    }
}
