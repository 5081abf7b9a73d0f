//! Provider-agnostic domain types: identifiers, bars, records, tokens.

mod ids;
mod lookback;
mod nullable;
mod ohlc;
mod overview;
mod provider;
mod token;

pub use ids::{ProviderKey, Symbol};
pub use lookback::{group_by_request, DayRecord, LookbackQuery, SymbolDays, SESSION_ORDER};
pub use ohlc::{pip_size, range_in_pips, Ohlc};
pub use overview::{display_order, OverviewCard, PriceLevel, CARD_GRID_DAYS};
pub use provider::{
    resolve_symbol, ProviderSelection, ProviderSource, ProviderStatus, DEFAULT_PROVIDER,
    KNOWN_PROVIDERS,
};
pub use token::{RequestGate, RequestToken};
