//! Trellis tables for the K=3, rate 1/2 code with generators 7 and 5 (octal).
//!
//! A state holds the two most recent input bits, the newest in bit 1.

use crate::dsp_types::*;

pub const NUM_STATES: usize = 4;
pub const TRANSITIONS_PER_STATE: usize = 2;

/// Two channel samples per input bit
pub const SAMPLES_PER_BIT: usize = 2;
pub const SAMPLES_PER_BYTE: usize = 8 * SAMPLES_PER_BIT;

/// Marks an impossible (state, next state) pair in `STATE_TRANSITION`
pub const INVALID_TRANSITION: u8 = 3;

/// Encoder output bit pair for the 3-bit input window
/// `newest << 2 | middle << 1 | oldest`
pub const TX_CONV_ENC_MAP: [u16; 8] = [0, 3, 1, 2, 3, 0, 2, 1];

/// Next state from [current state][branch]. The branch is the input bit.
pub const NEXT_STATE: [[StateNum; TRANSITIONS_PER_STATE]; NUM_STATES] = [
    [0, 2],
    [0, 2],
    [1, 3],
    [1, 3],
];

/// Ideal received sample pair for [current state][branch]
pub const IDEAL_SYMBOL: [[[RealSample; SAMPLES_PER_BIT]; TRANSITIONS_PER_STATE]; NUM_STATES] = [
    [[-1.0, -1.0], [ 1.0,  1.0]],   // 0, 3
    [[ 1.0,  1.0], [-1.0, -1.0]],   // 3, 0
    [[ 1.0, -1.0], [-1.0,  1.0]],   // 2, 1
    [[-1.0,  1.0], [ 1.0, -1.0]],   // 1, 2
];

/// Decoded input bit for [state][next state]
pub const STATE_TRANSITION: [[u8; NUM_STATES]; NUM_STATES] = [
    [0, 3, 1, 3],
    [0, 3, 1, 3],
    [3, 0, 3, 1],
    [3, 0, 3, 1],
];
