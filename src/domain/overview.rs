//! Daily overview summary cards.

use serde::{Deserialize, Serialize};

use super::ids::Symbol;
use super::nullable;

/// Number of trading days the card grid always requests.
pub const CARD_GRID_DAYS: u32 = 10;

/// A premium or discount level attached to a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    #[serde(default)]
    pub price: Option<f64>,
}

/// One summary card for a symbol and trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewCard {
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub symbol: Symbol,
    /// Empty when the server left it out.
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub date: String,
    #[serde(default)]
    pub market_condition: Option<String>,
    #[serde(default)]
    pub daily_range: Option<f64>,
    #[serde(default)]
    pub daily_open: Option<f64>,
    #[serde(default)]
    pub daily_high: Option<f64>,
    #[serde(default)]
    pub daily_low: Option<f64>,
    #[serde(default)]
    pub daily_close: Option<f64>,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub fvg_count: u32,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub liquidity_count: u32,
    #[serde(default)]
    pub top_premium: Option<PriceLevel>,
    #[serde(default)]
    pub top_discount: Option<PriceLevel>,
}

impl OverviewCard {
    /// Price of the top premium level, if the server sent one.
    #[must_use]
    pub fn premium_price(&self) -> Option<f64> {
        self.top_premium.as_ref().and_then(|level| level.price)
    }

    /// Price of the top discount level, if the server sent one.
    #[must_use]
    pub fn discount_price(&self) -> Option<f64> {
        self.top_discount.as_ref().and_then(|level| level.price)
    }
}

/// Order cards for display: the source sequence, reversed.
#[must_use]
pub fn display_order(mut cards: Vec<OverviewCard>) -> Vec<OverviewCard> {
    cards.reverse();
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_parses_with_sparse_fields() {
        let card: OverviewCard = serde_json::from_str(
            r#"{"symbol":"ES=F","date":"2024-03-01","daily_range":12.5,"top_premium":{"price":5100.25,"strength":3}}"#,
        )
        .unwrap();
        assert_eq!(card.fvg_count, 0);
        assert_eq!(card.premium_price(), Some(5100.25));
        assert_eq!(card.discount_price(), None);
        assert!(card.market_condition.is_none());
    }

    #[test]
    fn sparse_cards_decode_with_defaults() {
        let cards: Vec<OverviewCard> = serde_json::from_str(
            r#"[{"symbol":"ES=F","daily_range":1.0},{"symbol":null,"date":"2024-03-01","fvg_count":null,"liquidity_count":null}]"#,
        )
        .unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].date, "");
        assert_eq!(cards[0].daily_range, Some(1.0));
        assert_eq!(cards[1].symbol.as_str(), "");
        assert_eq!(cards[1].fvg_count, 0);
        assert_eq!(cards[1].liquidity_count, 0);
    }

    #[test]
    fn display_order_reverses_source() {
        let cards: Vec<OverviewCard> = ["2024-03-01", "2024-03-04", "2024-03-05"]
            .iter()
            .map(|date| OverviewCard {
                symbol: Symbol::new("ES=F"),
                date: (*date).to_string(),
                market_condition: None,
                daily_range: None,
                daily_open: None,
                daily_high: None,
                daily_low: None,
                daily_close: None,
                fvg_count: 0,
                liquidity_count: 0,
                top_premium: None,
                top_discount: None,
            })
            .collect();

        let dates: Vec<_> = display_order(cards).into_iter().map(|c| c.date).collect();
        assert_eq!(dates, vec!["2024-03-05", "2024-03-04", "2024-03-01"]);
    }
}
