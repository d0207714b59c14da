//! Trellis encoders and Viterbi decoders
//!
//! Two decoder variants share one Add-Compare-Select engine:
//! - `k3`: K=3, rate 1/2 convolutional code (generators 7, 5) over antipodal soft samples
//! - `v32`: 8-state V.32 style trellis code with differential coding and 32-point QAM mapping
//!
//! Decoders are plain values. Everything they need lives inside them, so any
//! number of independent instances can run side by side.

pub mod dsp_types;
pub mod engine;
pub mod k3;
pub mod v32;

pub use dsp_types::*;
pub use k3::{K3Decoder, K3Encoder};
pub use v32::{V32Decoder, V32Encoder};
pub use trellis_core::{NormalisePolicy, ViterbiInitErr, ViterbiParams};
