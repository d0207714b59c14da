#![allow(dead_code, unused_imports)]

pub mod channel;
pub mod harness;

pub use channel::NoisyChannel;
pub use harness::{k3_round_trip, v32_round_trip};
