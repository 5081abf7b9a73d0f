//! Data provider status and selection.

use std::fmt;

use serde::Serialize;

use super::ids::{ProviderKey, Symbol};

/// Provider used when neither a flag nor a stored preference names one.
pub const DEFAULT_PROVIDER: &str = "yfinance";

/// Providers the API ships with, offered when it cannot be asked.
pub const KNOWN_PROVIDERS: [&str; 3] = ["yfinance", "fmp", "polygon"];

/// Health of a single upstream data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub key: ProviderKey,
    pub name: String,
    pub available: bool,
}

impl ProviderStatus {
    /// Create a status entry; an empty display name falls back to the key.
    pub fn new(key: impl Into<ProviderKey>, name: Option<String>, available: bool) -> Self {
        let key = key.into();
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| key.to_string());
        Self {
            key,
            name,
            available,
        }
    }
}

/// Where the active provider selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderSource {
    /// Passed explicitly for this invocation.
    Explicit,
    /// Read from the persisted preference.
    Stored,
    /// Nothing configured; built-in default.
    Fallback,
}

impl fmt::Display for ProviderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Explicit => "explicit",
            Self::Stored => "stored preference",
            Self::Fallback => "default",
        };
        f.write_str(label)
    }
}

/// The provider a request should be made against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSelection {
    pub key: ProviderKey,
    pub source: ProviderSource,
}

impl ProviderSelection {
    /// Resolve explicit selection, then stored preference, then the default.
    ///
    /// Blank values are ignored at every level.
    #[must_use]
    pub fn resolve(explicit: Option<&str>, stored: Option<&str>, fallback: &str) -> Self {
        let pick = |raw: Option<&str>| raw.map(ProviderKey::new).filter(|k| !k.is_empty());

        if let Some(key) = pick(explicit) {
            return Self {
                key,
                source: ProviderSource::Explicit,
            };
        }
        if let Some(key) = pick(stored) {
            return Self {
                key,
                source: ProviderSource::Stored,
            };
        }
        let key = pick(Some(fallback)).unwrap_or_else(|| ProviderKey::new(DEFAULT_PROVIDER));
        Self {
            key,
            source: ProviderSource::Fallback,
        }
    }
}

/// Canonical symbol → provider-specific ticker table.
const CANONICAL_SYMBOLS: &[(&str, &[(&str, &str)])] = &[
    (
        "GOLD",
        &[("yfinance", "GC=F"), ("fmp", "GOLD"), ("polygon", "GC")],
    ),
    (
        "SILVER",
        &[("yfinance", "SI=F"), ("fmp", "SILVER"), ("polygon", "SI")],
    ),
    (
        "BTC",
        &[("yfinance", "BTC-USD"), ("fmp", "BTCUSD"), ("polygon", "BTCUSD")],
    ),
];

/// Translate a symbol into the ticker a given provider expects.
///
/// Accepts either a canonical name (`GOLD`) or another provider's ticker
/// (`GC=F`). Unknown symbols pass through untouched.
#[must_use]
pub fn resolve_symbol(symbol: &Symbol, provider: &ProviderKey) -> Symbol {
    let wanted = symbol.as_str().trim().to_ascii_uppercase();
    if wanted.is_empty() {
        return symbol.clone();
    }
    // `yf` is accepted as shorthand for yfinance by the API
    let provider = match provider.as_str() {
        "yf" => "yfinance",
        other => other,
    };

    let mapping = CANONICAL_SYMBOLS.iter().find_map(|(canonical, tickers)| {
        let is_match = *canonical == wanted
            || tickers
                .iter()
                .any(|(_, ticker)| ticker.eq_ignore_ascii_case(&wanted));
        is_match.then_some(*tickers)
    });

    mapping
        .and_then(|tickers| {
            tickers
                .iter()
                .find(|(name, _)| *name == provider)
                .map(|(_, ticker)| Symbol::new(ticker))
        })
        .unwrap_or_else(|| symbol.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_name_falls_back_to_key() {
        let status = ProviderStatus::new("polygon", Some("  ".into()), false);
        assert_eq!(status.name, "polygon");
        let status = ProviderStatus::new("yf", Some("YFinance".into()), true);
        assert_eq!(status.name, "YFinance");
    }

    #[test]
    fn explicit_selection_wins() {
        let selection = ProviderSelection::resolve(Some("FMP"), Some("polygon"), DEFAULT_PROVIDER);
        assert_eq!(selection.key.as_str(), "fmp");
        assert_eq!(selection.source, ProviderSource::Explicit);
    }

    #[test]
    fn stored_selection_used_without_flag() {
        let selection = ProviderSelection::resolve(None, Some("polygon"), DEFAULT_PROVIDER);
        assert_eq!(selection.key.as_str(), "polygon");
        assert_eq!(selection.source, ProviderSource::Stored);
    }

    #[test]
    fn blank_values_fall_through_to_default() {
        let selection = ProviderSelection::resolve(Some(" "), Some(""), DEFAULT_PROVIDER);
        assert_eq!(selection.key.as_str(), DEFAULT_PROVIDER);
        assert_eq!(selection.source, ProviderSource::Fallback);
    }

    #[test]
    fn canonical_symbols_map_per_provider() {
        let gold = Symbol::new("gold");
        assert_eq!(resolve_symbol(&gold, &ProviderKey::new("yfinance")).as_str(), "GC=F");
        assert_eq!(resolve_symbol(&gold, &ProviderKey::new("polygon")).as_str(), "GC");
        assert_eq!(resolve_symbol(&gold, &ProviderKey::new("yf")).as_str(), "GC=F");
    }

    #[test]
    fn provider_tickers_translate_across_providers() {
        let btc = Symbol::new("BTC-USD");
        assert_eq!(resolve_symbol(&btc, &ProviderKey::new("fmp")).as_str(), "BTCUSD");
    }

    #[test]
    fn unknown_symbols_pass_through() {
        let es = Symbol::new("ES=F");
        assert_eq!(resolve_symbol(&es, &ProviderKey::new("fmp")), es);
        let gold = Symbol::new("GOLD");
        assert_eq!(resolve_symbol(&gold, &ProviderKey::new("binance")), gold);
    }
}
