//! Overview card grid loader.
//!
//! Loads on start and on every symbol change, always for the fixed
//! [`CARD_GRID_DAYS`] window. Cards are shown in reversed source order.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::page::{Content, RegionId, SharedPage};
use super::ViewOutcome;
use crate::domain::{display_order, RequestGate, Symbol, CARD_GRID_DAYS};
use crate::port::MarketApi;

/// Loads summary cards for the selected symbol.
pub struct CardGridLoader {
    api: Arc<dyn MarketApi>,
    page: Arc<SharedPage>,
    gate: RequestGate,
}

impl CardGridLoader {
    #[must_use]
    pub fn new(api: Arc<dyn MarketApi>, page: Arc<SharedPage>) -> Self {
        Self {
            api,
            page,
            gate: RequestGate::new(),
        }
    }

    /// Load and render cards for `symbol`.
    pub async fn load(&self, symbol: &Symbol) -> ViewOutcome {
        let token = self.gate.issue();
        info!(symbol = %symbol, days = CARD_GRID_DAYS, "Loading overview cards");

        self.page.update(RegionId::CardGrid, |region| {
            region.set(Content::Loading {
                message: format!("Loading {symbol}..."),
            });
        });

        let result = self.api.overview_cards(symbol, CARD_GRID_DAYS).await;

        if !self.gate.is_current(token) {
            debug!(token = token.sequence(), symbol = %symbol, "Discarding stale card grid");
            return ViewOutcome::Stale;
        }

        let (content, outcome) = match result {
            Ok(cards) if cards.is_empty() => (
                Content::Empty {
                    message: format!("No data available for {symbol}"),
                },
                ViewOutcome::Empty,
            ),
            Ok(cards) => {
                debug!(symbol = %symbol, cards = cards.len(), "Card grid rendered");
                (
                    Content::CardGrid {
                        symbol: symbol.clone(),
                        cards: display_order(cards),
                    },
                    ViewOutcome::Rendered,
                )
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Card grid failed");
                (
                    Content::Error {
                        message: format!("Error loading data: {e}"),
                    },
                    ViewOutcome::Failed,
                )
            }
        };

        let committed = self
            .page
            .update_if(RegionId::CardGrid, || self.gate.is_current(token), |region| {
                region.set(content);
            });
        if committed.is_none() {
            debug!(token = token.sequence(), "Newer request committed first, dropping response");
            return ViewOutcome::Stale;
        }
        outcome
    }
}
