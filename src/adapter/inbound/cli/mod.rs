//! CLI module graph.

pub mod cards;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod diagnostic;
pub mod lookback;
pub mod output;
pub mod paths;
pub mod providers;
pub mod render;
pub mod status;
