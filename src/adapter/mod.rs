//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - The CLI that drives the view components
//! - [`outbound`] - HTTP market API client and preference stores

pub mod inbound;
pub mod outbound;
