//! Infrastructure layer.
//!
//! Provides technical concerns that support the view components without
//! containing view logic: configuration loading, logging setup and the
//! composition root that wires adapters into components.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
