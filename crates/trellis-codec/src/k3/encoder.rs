// K=3, rate 1/2 convolutional encoder

use crate::dsp_types::*;

use super::tables::{SAMPLES_PER_BYTE, TX_CONV_ENC_MAP};

/// Encoder state: the top two bits of the previously encoded byte.
#[derive(Clone, Copy, Debug, Default)]
pub struct K3Encoder {
    history: u8,
}

impl K3Encoder {
    /// Create a new encoder state (all zeros).
    #[inline]
    pub fn new() -> Self {
        Self { history: 0 }
    }

    /// Reset to all-zero state.
    #[inline]
    pub fn reset(&mut self) {
        self.history = 0;
    }

    #[inline]
    pub fn history(&self) -> u8 {
        self.history
    }

    /// Encode one byte, LSB first, into 8 output bit pairs.
    /// Pair `k` occupies bits `2k` (first channel sample) and `2k + 1`.
    pub fn encode(&mut self, input: u8) -> u16 {
        // Input bits with the two carried-over bits below them:
        // bit 0 and 1 are the previous byte's bits 6 and 7
        let window = ((input as u16) << 2) | self.history as u16;

        let mut output: u16 = 0;
        for k in 0..8 {
            // Window index is newest << 2 | middle << 1 | oldest
            let idx = ((window >> k) & 0x7) as usize;
            output |= TX_CONV_ENC_MAP[idx] << (2 * k);
        }

        self.history = (input & 0xc0) >> 6;
        output
    }

    /// Encode a byte and map it straight to antipodal channel samples
    pub fn encode_samples(&mut self, input: u8) -> [RealSample; SAMPLES_PER_BYTE] {
        to_channel_samples(self.encode(input))
    }
}

/// Map each encoded bit to an ideal channel sample, 0 to -1 and 1 to +1.
pub fn to_channel_samples(encoded: u16) -> [RealSample; SAMPLES_PER_BYTE] {
    std::array::from_fn(|j| if (encoded >> j) & 1 != 0 { 1.0 } else { -1.0 })
}
