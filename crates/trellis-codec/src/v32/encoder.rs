// V.32 style trellis encoder: differential coding, convolutional coding and QAM mapping

use crate::dsp_types::*;

use super::differential::diff_encode;
use super::tables::{CONSTELLATION, CONV_ENC_OUTPUT, NEXT_STATE};

#[derive(Clone, Copy, Debug, Default)]
pub struct V32Encoder {
    /// Previously differentially encoded dibit
    diff_state: u8,
    /// Convolutional encoder state, 0..8
    conv_state: u8,
}

impl V32Encoder {
    pub fn new() -> Self {
        Self { diff_state: 0, conv_state: 0 }
    }

    pub fn reset(&mut self) {
        self.diff_state = 0;
        self.conv_state = 0;
    }

    pub fn diff_state(&self) -> u8 {
        self.diff_state
    }

    pub fn conv_state(&self) -> u8 {
        self.conv_state
    }

    /// 5-bit constellation code for the low 4 bits of `nibble`, advancing the encoder.
    pub fn encode_code(&mut self, nibble: u8) -> u8 {
        // The 2 LSBs are differentially encoded and drive the convolutional encoder
        let dibit = diff_encode(nibble & 0x3, self.diff_state);
        self.diff_state = dibit;

        let conv = self.conv_state as usize;
        // The 2 MSBs pass through uncoded as Q4Q3
        let code = CONV_ENC_OUTPUT[conv][dibit as usize] | ((nibble & 0x0c) << 1);
        self.conv_state = NEXT_STATE[conv][dibit as usize];

        tracing::trace!("nibble {:#x} -> code {:#04x}", nibble & 0x0f, code);
        code
    }

    /// Encode one nibble to its channel symbol.
    pub fn encode(&mut self, nibble: u8) -> ComplexSample {
        CONSTELLATION[self.encode_code(nibble) as usize]
    }

    /// Encode a byte as two symbols, low nibble first
    pub fn encode_byte(&mut self, byte: u8) -> [ComplexSample; 2] {
        let lo = self.encode(byte & 0x0f);
        let hi = self.encode(byte >> 4);
        [lo, hi]
    }
}
