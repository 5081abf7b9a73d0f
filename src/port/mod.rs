//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`MarketApi`] - Provider status, lookback and overview card endpoints
//! - [`PreferenceStore`] - The persisted provider preference

pub mod outbound;

pub use outbound::market::{ApiResult, MarketApi};
pub use outbound::preference::PreferenceStore;
