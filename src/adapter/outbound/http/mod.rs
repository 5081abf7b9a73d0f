//! HTTP adapter for the market-data JSON API.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::HttpMarketApi;
pub use settings::{ApiConfig, EndpointConfig, DEFAULT_BASE_URL};
