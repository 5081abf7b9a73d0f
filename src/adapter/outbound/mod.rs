//! Outbound adapters (driven side): HTTP API client and preference stores.

pub mod http;
pub mod preference;
