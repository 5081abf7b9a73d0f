//! Open/high/low/close bars and range helpers.

use serde::{Deserialize, Serialize};

/// One OHLC bar as returned by the API.
///
/// Every value may be missing; providers send `null` for gaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl Ohlc {
    /// High minus low, when both are known.
    #[must_use]
    pub fn range(&self) -> Option<f64> {
        Some(self.high? - self.low?)
    }

    /// Whether the bar closed at or above its open. `None` when either is missing.
    #[must_use]
    pub fn is_bullish(&self) -> Option<bool> {
        Some(self.close? >= self.open?)
    }
}

/// Pip size for a symbol, if it looks like an FX pair.
///
/// JPY crosses quote to two decimals; other majors to four. Anything else
/// (futures, indices, crypto) has no pip value.
#[must_use]
pub fn pip_size(symbol: &str) -> Option<f64> {
    let upper = symbol.to_ascii_uppercase();
    if upper.contains("JPY") {
        return Some(0.01);
    }
    const MAJORS: [&str; 6] = ["USD", "EUR", "GBP", "AUD", "NZD", "CHF"];
    if MAJORS.iter().any(|ccy| upper.contains(ccy)) {
        return Some(0.0001);
    }
    None
}

/// Convert a range in points to whole pips for FX symbols.
#[must_use]
pub fn range_in_pips(symbol: &str, range_points: f64) -> Option<i64> {
    let pip = pip_size(symbol)?;
    Some((range_points / pip).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpy_pairs_use_two_decimal_pips() {
        assert_eq!(pip_size("USDJPY=X"), Some(0.01));
    }

    #[test]
    fn majors_use_four_decimal_pips() {
        assert_eq!(pip_size("EURUSD=X"), Some(0.0001));
        assert_eq!(pip_size("gbpchf=x"), Some(0.0001));
    }

    #[test]
    fn futures_have_no_pip_size() {
        assert_eq!(pip_size("ES=F"), None);
        assert_eq!(range_in_pips("ES=F", 42.5), None);
    }

    #[test]
    fn range_converts_to_rounded_pips() {
        assert_eq!(range_in_pips("EURUSD=X", 0.00874), Some(87));
        assert_eq!(range_in_pips("USDJPY=X", 1.236), Some(124));
    }

    #[test]
    fn bar_range_and_direction() {
        let bar = Ohlc {
            open: Some(100.0),
            high: Some(104.0),
            low: Some(99.0),
            close: Some(103.0),
            volume: None,
        };
        assert_eq!(bar.range(), Some(5.0));
        assert_eq!(bar.is_bullish(), Some(true));
    }

    #[test]
    fn bar_with_null_prices_decodes() {
        let bar: Ohlc =
            serde_json::from_str(r#"{"open":1.5,"high":null,"close":1.25}"#).unwrap();
        assert_eq!(bar.open, Some(1.5));
        assert_eq!(bar.high, None);
        assert_eq!(bar.low, None);
        assert_eq!(bar.range(), None);
        assert_eq!(bar.is_bullish(), Some(false));
    }
}
