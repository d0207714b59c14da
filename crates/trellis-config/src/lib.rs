//! Trellis simulator configuration management
//!
//! This crate provides configuration loading and parsing for the trellis simulator:
//! - TOML configuration file parsing
//! - Decoder, channel and message source configuration structures

pub mod sim_config;
pub mod toml_config;

pub use sim_config::*;
pub use toml_config::*;
