//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`api`] - [`ScriptedApi`](api::ScriptedApi), a [`MarketApi`](crate::port::MarketApi)
//!   with queued or deferred responses and a call log.
//! - [`domain`] - Builders for statuses, day records, cards and API errors.
//! - [`server`] - A loopback HTTP stub for exercising the real client.

pub mod api;
pub mod domain;
pub mod server;
