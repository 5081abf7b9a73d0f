//! Lookback query and per-day records.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::ids::{ProviderKey, Symbol};
use super::nullable;
use super::ohlc::{range_in_pips, Ohlc};
use crate::error::InputError;

/// Trading sessions in the order they are displayed.
pub const SESSION_ORDER: [&str; 7] = [
    "asian_range",
    "london_killzone",
    "london_open",
    "ny_killzone",
    "ny_open",
    "power_3",
    "london_close",
];

/// Validated parameters for one lookback request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookbackQuery {
    pub symbols: Vec<Symbol>,
    pub days: u32,
    /// Time of day (`HH:MM`, exchange local) to inspect, if any.
    pub time: Option<NaiveTime>,
    /// Minutes around `time` to aggregate.
    pub window: u32,
    pub provider: ProviderKey,
}

impl LookbackQuery {
    /// Build a query from raw operator input.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] when no symbol survives trimming, `days`
    /// or `window` is zero, or `time` is not a valid `HH:MM`.
    pub fn new(
        symbols: &str,
        days: u32,
        time: Option<&str>,
        window: u32,
        provider: ProviderKey,
    ) -> Result<Self, InputError> {
        let symbols = Symbol::parse_list(symbols);
        if symbols.is_empty() {
            return Err(InputError::NoSymbols);
        }
        if days == 0 {
            return Err(InputError::NotPositive { field: "days" });
        }
        if window == 0 {
            return Err(InputError::NotPositive { field: "window" });
        }
        let time = time
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(parse_time)
            .transpose()?;

        Ok(Self {
            symbols,
            days,
            time,
            window,
            provider,
        })
    }

    /// Query string pairs in the order the API documents them.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("symbols", Symbol::join(&self.symbols)),
            ("days", self.days.to_string()),
        ];
        if let Some(time) = self.time {
            pairs.push(("time", time.format("%H:%M").to_string()));
        }
        pairs.push(("window", self.window.to_string()));
        pairs.push(("provider", self.provider.to_string()));
        pairs
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime, InputError> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| InputError::InvalidTime {
        value: raw.to_string(),
    })
}

/// One calendar day of a lookback response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Empty when the server left it out.
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub date: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub symbol: Symbol,
    #[serde(default)]
    pub daily_open: Option<f64>,
    #[serde(default)]
    pub daily_high: Option<f64>,
    #[serde(default)]
    pub daily_low: Option<f64>,
    #[serde(default)]
    pub daily_close: Option<f64>,
    #[serde(default)]
    pub daily_volume: Option<f64>,
    #[serde(default)]
    pub range_points: Option<f64>,
    #[serde(default)]
    pub range_pips: Option<i64>,
    #[serde(default)]
    pub sessions: Option<BTreeMap<String, Option<Ohlc>>>,
    #[serde(default)]
    pub selected_time: Option<Ohlc>,
}

impl DayRecord {
    /// Pips reported by the server, or derived from the point range for FX.
    #[must_use]
    pub fn pips(&self) -> Option<i64> {
        self.range_pips.or_else(|| {
            self.range_points
                .and_then(|points| range_in_pips(self.symbol.as_str(), points))
        })
    }

    /// Sessions in display order: known sessions first, then the rest by name.
    #[must_use]
    pub fn ordered_sessions(&self) -> Vec<(&str, Option<&Ohlc>)> {
        let Some(sessions) = &self.sessions else {
            return Vec::new();
        };

        let mut ordered: Vec<(&str, Option<&Ohlc>)> = SESSION_ORDER
            .iter()
            .filter_map(|name| {
                sessions
                    .get_key_value(*name)
                    .map(|(k, v)| (k.as_str(), v.as_ref()))
            })
            .collect();
        ordered.extend(
            sessions
                .iter()
                .filter(|(name, _)| !SESSION_ORDER.contains(&name.as_str()))
                .map(|(k, v)| (k.as_str(), v.as_ref())),
        );
        ordered
    }
}

/// Days for one symbol, in the order the API returned them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolDays {
    pub symbol: Symbol,
    pub days: Vec<DayRecord>,
}

/// Group a lookback `data` map by symbol.
///
/// Requested symbols come first in request order; anything else the server
/// added follows in key order.
#[must_use]
pub fn group_by_request(
    requested: &[Symbol],
    mut data: BTreeMap<String, Vec<DayRecord>>,
) -> Vec<SymbolDays> {
    let mut groups = Vec::with_capacity(data.len());
    for symbol in requested {
        if let Some(days) = data.remove(symbol.as_str()) {
            groups.push(SymbolDays {
                symbol: symbol.clone(),
                days,
            });
        }
    }
    groups.extend(data.into_iter().map(|(symbol, days)| SymbolDays {
        symbol: Symbol::new(symbol),
        days,
    }));
    groups
}
