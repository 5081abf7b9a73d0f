//! marketdeck - a terminal client for a market-data JSON API.
//!
//! Three independent view components fetch JSON and render it into named
//! regions of a terminal page:
//!
//! - **Provider status poller** - polls provider availability on an
//!   interval and keeps the last good rows when a poll fails
//! - **Lookback fetcher** - one request per trigger, day cards grouped by
//!   symbol, server error text shown inline
//! - **Card grid loader** - overview cards for the selected symbol, shown
//!   in reversed source order
//!
//! Every component takes a request token before it suspends and drops any
//! response that is no longer the newest, so a slow reply can never
//! overwrite a fresher one.
//!
//! # Modules
//!
//! - [`domain`] - Identifiers, OHLC bars, lookback and overview records
//! - [`port`] - The [`MarketApi`](port::MarketApi) and
//!   [`PreferenceStore`](port::PreferenceStore) traits
//! - [`application`] - Page model and the three view components
//! - [`adapter`] - reqwest API client, preference files and the CLI
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use marketdeck::domain::Symbol;
//! use marketdeck::infrastructure::bootstrap::Services;
//! use marketdeck::infrastructure::config::Config;
//!
//! # async fn run() -> marketdeck::error::Result<()> {
//! let services = Services::from_config(Config::load("config.toml")?)?;
//! services.card_grid_loader().load(&Symbol::new("ES=F")).await;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
