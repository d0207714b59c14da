//! 8-state V.32 style trellis code: differential coding of the two LSBs,
//! a rate 2/3 convolutional code producing the path state, and a 32-point
//! QAM constellation carrying the two uncoded MSBs as sub-state.

pub mod branch_metrics;
pub mod decoder;
pub mod differential;
pub mod encoder;
pub mod tables;

pub use branch_metrics::PathStateMetrics;
pub use decoder::{V32Decoder, V32Slot};
pub use differential::{diff_decode, diff_encode};
pub use encoder::V32Encoder;
