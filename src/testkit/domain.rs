//! Builders for domain values used across tests.

use std::collections::BTreeMap;

use crate::domain::{DayRecord, Ohlc, OverviewCard, PriceLevel, ProviderStatus, Symbol};
use crate::error::ApiError;

/// Provider status entry.
pub fn status(key: &str, name: &str, available: bool) -> ProviderStatus {
    ProviderStatus::new(key, Some(name.to_string()), available)
}

/// A bar with the given open and close; high and low bracket them.
pub fn bar(open: f64, close: f64) -> Ohlc {
    Ohlc {
        open: Some(open),
        high: Some(open.max(close) + 1.0),
        low: Some(open.min(close) - 1.0),
        close: Some(close),
        volume: None,
    }
}

/// A lookback day with daily values and two sessions.
pub fn day(symbol: &str, date: &str) -> DayRecord {
    let mut sessions = BTreeMap::new();
    sessions.insert("ny_open".to_string(), Some(bar(100.0, 102.0)));
    sessions.insert("asian_range".to_string(), Some(bar(99.0, 98.5)));
    DayRecord {
        date: date.to_string(),
        symbol: Symbol::new(symbol),
        daily_open: Some(100.0),
        daily_high: Some(104.0),
        daily_low: Some(97.0),
        daily_close: Some(103.0),
        daily_volume: Some(12_500.0),
        range_points: Some(7.0),
        range_pips: None,
        sessions: Some(sessions),
        selected_time: None,
    }
}

/// An overview card with every field set.
pub fn card(symbol: &str, date: &str) -> OverviewCard {
    OverviewCard {
        symbol: Symbol::new(symbol),
        date: date.to_string(),
        market_condition: Some("Bullish".to_string()),
        daily_range: Some(25.0),
        daily_open: Some(5100.0),
        daily_high: Some(5120.0),
        daily_low: Some(5095.0),
        daily_close: Some(5115.0),
        fvg_count: 2,
        liquidity_count: 1,
        top_premium: Some(PriceLevel {
            price: Some(5130.0),
        }),
        top_discount: Some(PriceLevel {
            price: Some(5090.0),
        }),
    }
}

/// Cards for consecutive March dates, in source order.
pub fn cards(symbol: &str, count: usize) -> Vec<OverviewCard> {
    (1..=count)
        .map(|d| card(symbol, &format!("2024-03-{d:02}")))
        .collect()
}

/// A failure the server reported in its envelope.
pub fn application_error(endpoint: &'static str, message: &str) -> ApiError {
    ApiError::Application {
        endpoint,
        message: message.to_string(),
    }
}

/// A request that never got a response.
pub fn transport_error(endpoint: &'static str) -> ApiError {
    ApiError::Transport {
        endpoint,
        detail: "connection refused".to_string(),
    }
}
