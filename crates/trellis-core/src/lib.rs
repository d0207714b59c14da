//! Core utilities for the trellis decoder stack
//!
//! This crate provides the types shared between the codec, the configuration
//! loader and the simulator:
//! - ViterbiParams and NormalisePolicy for decoder construction
//! - ViterbiInitErr for rejected decoder configurations
//! - Logging setup and debug macros

pub mod debug;
pub mod params;
pub mod viterbi_init_err;

// Re-export commonly used items
pub use params::*;
pub use viterbi_init_err::ViterbiInitErr;
