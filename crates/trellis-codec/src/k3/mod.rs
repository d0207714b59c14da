pub mod decoder;
pub mod encoder;
pub mod tables;

pub use decoder::K3Decoder;
pub use encoder::{K3Encoder, to_channel_samples};
pub use tables::{SAMPLES_PER_BIT, SAMPLES_PER_BYTE};
