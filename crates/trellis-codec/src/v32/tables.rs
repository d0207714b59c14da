//! Trellis, constellation and differential coding tables for the 8-state
//! V.32 style trellis code.
//!
//! A 5-bit constellation code is `path_state | sub_state << 3`. The 3-bit path
//! state is the convolutional encoder output, the 2-bit sub-state (Q4Q3) is
//! carried uncoded.

use crate::dsp_types::*;

pub const NUM_STATES: usize = 8;
pub const TRANSITIONS_PER_STATE: usize = 4;
pub const NUM_PATH_STATES: usize = 8;
pub const SUB_STATES_PER_PATH_STATE: usize = 4;
pub const NUM_CONSTELLATION_POINTS: usize = NUM_PATH_STATES * SUB_STATES_PER_PATH_STATE;

/// Marks an impossible (state, next state) pair in `STATE_TRANSITION`
pub const INVALID_TRANSITION: u8 = 8;

/// Next state from [current state][branch]. The branch is the differentially
/// encoded dibit. Shared by the transmitter and the receiver.
pub const NEXT_STATE: [[StateNum; TRANSITIONS_PER_STATE]; NUM_STATES] = [
    [0, 2, 3, 1], [4, 7, 5, 6],
    [1, 3, 2, 0], [7, 4, 6, 5],
    [2, 0, 1, 3], [6, 5, 7, 4],
    [3, 1, 0, 2], [5, 6, 4, 7],
];

/// Convolutional encoder output (path state) for [current state][branch]
pub const CONV_ENC_OUTPUT: [[u8; TRANSITIONS_PER_STATE]; NUM_STATES] = [
    [0, 2, 4, 6], [1, 3, 5, 7],
    [0, 2, 4, 6], [1, 3, 5, 7],
    [0, 2, 4, 6], [1, 3, 5, 7],
    [0, 2, 4, 6], [1, 3, 5, 7],
];

/// Path state for [state][next state]
pub const STATE_TRANSITION: [[u8; NUM_STATES]; NUM_STATES] = [
    [0, 6, 2, 4, 8, 8, 8, 8],
    [8, 8, 8, 8, 1, 5, 7, 3],
    [6, 0, 4, 2, 8, 8, 8, 8],
    [8, 8, 8, 8, 3, 7, 5, 1],
    [2, 4, 0, 6, 8, 8, 8, 8],
    [8, 8, 8, 8, 7, 3, 1, 5],
    [4, 2, 6, 0, 8, 8, 8, 8],
    [8, 8, 8, 8, 5, 1, 3, 7],
];

/// 32-point constellation indexed by the 5-bit code
pub const CONSTELLATION: [ComplexSample; NUM_CONSTELLATION_POINTS] = [
    ComplexSample{ re: -4.0, im:  1.0 }, ComplexSample{ re: -3.0, im: -2.0 },
    ComplexSample{ re: -2.0, im:  3.0 }, ComplexSample{ re:  1.0, im:  4.0 },
    ComplexSample{ re:  4.0, im: -1.0 }, ComplexSample{ re:  3.0, im:  2.0 },
    ComplexSample{ re:  2.0, im: -3.0 }, ComplexSample{ re: -1.0, im: -4.0 },
    ComplexSample{ re:  0.0, im:  1.0 }, ComplexSample{ re: -3.0, im:  2.0 },
    ComplexSample{ re:  2.0, im:  3.0 }, ComplexSample{ re:  1.0, im:  0.0 },
    ComplexSample{ re:  0.0, im: -1.0 }, ComplexSample{ re:  3.0, im: -2.0 },
    ComplexSample{ re: -2.0, im: -3.0 }, ComplexSample{ re: -1.0, im:  0.0 },
    ComplexSample{ re:  0.0, im: -3.0 }, ComplexSample{ re:  1.0, im: -2.0 },
    ComplexSample{ re: -2.0, im: -1.0 }, ComplexSample{ re: -3.0, im:  0.0 },
    ComplexSample{ re:  0.0, im:  3.0 }, ComplexSample{ re: -1.0, im:  2.0 },
    ComplexSample{ re:  2.0, im:  1.0 }, ComplexSample{ re:  3.0, im:  0.0 },
    ComplexSample{ re:  4.0, im:  1.0 }, ComplexSample{ re:  1.0, im:  2.0 },
    ComplexSample{ re:  2.0, im: -1.0 }, ComplexSample{ re:  1.0, im: -4.0 },
    ComplexSample{ re: -4.0, im: -1.0 }, ComplexSample{ re: -1.0, im: -2.0 },
    ComplexSample{ re: -2.0, im:  1.0 }, ComplexSample{ re: -1.0, im:  4.0 },
];

/// Differential encoder output for [current input][previous output]
pub const DIFF_ENCODER: [[u8; 4]; 4] = [
    [0, 1, 2, 3],
    [1, 2, 3, 0],
    [2, 3, 0, 1],
    [3, 0, 1, 2],
];

/// Differential decoder output for [current input][previous input]
pub const DIFF_DECODER: [[u8; 4]; 4] = [
    [0, 3, 2, 1],
    [1, 0, 3, 2],
    [2, 1, 0, 3],
    [3, 2, 1, 0],
];

/// Path state on branch `branch` out of `state`
#[inline]
pub const fn path_state(state: usize, branch: usize) -> usize {
    (branch << 1) | (state & 1)
}

/// Constellation point for a path state and sub-state
#[inline]
pub fn constellation_point(path_state: usize, sub_state: usize) -> ComplexSample {
    CONSTELLATION[path_state | (sub_state << 3)]
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transition_matches_next_state() {
        for state in 0..NUM_STATES {
            for branch in 0..TRANSITIONS_PER_STATE {
                let next = NEXT_STATE[state][branch] as usize;
                assert_eq!(STATE_TRANSITION[state][next] as usize, path_state(state, branch));
                assert_eq!(CONV_ENC_OUTPUT[state][branch] as usize, path_state(state, branch));
            }
            let valid = STATE_TRANSITION[state].iter().filter(|&&p| p != INVALID_TRANSITION).count();
            assert_eq!(valid, TRANSITIONS_PER_STATE);
        }
    }

    #[test]
    fn test_constellation_points_distinct() {
        for a in 0..NUM_CONSTELLATION_POINTS {
            for b in (a + 1)..NUM_CONSTELLATION_POINTS {
                assert_ne!(CONSTELLATION[a], CONSTELLATION[b], "codes {} and {}", a, b);
            }
        }
    }

    #[test]
    fn test_every_state_has_four_predecessors() {
        let mut count = [0; NUM_STATES];
        for branches in NEXT_STATE.iter() {
            for &next in branches.iter() {
                count[next as usize] += 1;
            }
        }
        assert_eq!(count, [TRANSITIONS_PER_STATE; NUM_STATES]);
    }
}
