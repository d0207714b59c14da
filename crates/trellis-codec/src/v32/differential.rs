// Differential coding of the two least significant bits of each symbol

use super::tables::{DIFF_DECODER, DIFF_ENCODER};

/// Differentially encode `dibit` given the previously encoded dibit.
/// The result is also the state for the next call.
#[inline]
pub fn diff_encode(dibit: u8, prev_output: u8) -> u8 {
    DIFF_ENCODER[(dibit & 0x3) as usize][(prev_output & 0x3) as usize]
}

/// Undo `diff_encode`. `prev_input` is the previously received encoded dibit.
#[inline]
pub fn diff_decode(dibit: u8, prev_input: u8) -> u8 {
    DIFF_DECODER[(dibit & 0x3) as usize][(prev_input & 0x3) as usize]
}
