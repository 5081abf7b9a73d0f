//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the external dependencies of the view
//! components: the market-data API and the local preference store.

pub mod market;
pub mod preference;
