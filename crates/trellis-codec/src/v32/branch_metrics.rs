use crate::dsp_types::*;

use super::tables::{NUM_PATH_STATES, SUB_STATES_PER_PATH_STATE, constellation_point};

/// Branch metrics of one received symbol, reduced to one value per path state.
///
/// Within a path state the four sub-states are parallel transitions between
/// the same pair of trellis states, so only the nearest one can ever survive.
/// Picking it here leaves the Add-Compare-Select step with 8 metrics instead of 32.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStateMetrics {
    /// Smallest squared distance to any point of each path state
    pub errors: [Metric; NUM_PATH_STATES],
    /// Sub-state of the nearest point, already shifted into Q4Q3 position
    pub q4q3: [u8; NUM_PATH_STATES],
}

impl PathStateMetrics {
    pub fn compute(received: ComplexSample) -> Self {
        let mut errors = [METRIC_MAX; NUM_PATH_STATES];
        let mut q4q3 = [0u8; NUM_PATH_STATES];

        for path_state in 0..NUM_PATH_STATES {
            for sub_state in 0..SUB_STATES_PER_PATH_STATE {
                let distance = (constellation_point(path_state, sub_state) - received).norm_sqr();
                if distance < errors[path_state] {
                    errors[path_state] = distance;
                    q4q3[path_state] = (sub_state << 2) as u8;
                }
            }
        }
        Self { errors, q4q3 }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::v32::tables::CONSTELLATION;

    #[test]
    fn test_exact_point_has_zero_error() {
        for code in 0..CONSTELLATION.len() {
            let m = PathStateMetrics::compute(CONSTELLATION[code]);
            let path_state = code & 0x7;
            assert_eq!(m.errors[path_state], 0.0);
            assert_eq!(m.q4q3[path_state] as usize, (code >> 3) << 2);
            assert!(m.errors.iter().enumerate().all(|(p, &e)| p == path_state || e > 0.0));
        }
    }

    #[test]
    fn test_metric_is_squared_distance() {
        // Nearest point of path state 0 to the origin is code 8 at (0, 1)
        let m = PathStateMetrics::compute(ComplexSample::new(0.0, 0.0));
        assert_eq!(m.errors[0], 1.0);
        assert_eq!(m.q4q3[0], 1 << 2);
    }

    #[test]
    fn test_equidistant_sub_states_keep_first() {
        // Path state 3 holds codes 3 (1, 4), 11 (1, 0), 19 (-3, 0) and 27 (1, -4).
        // (1, 2) is 2 away from both code 3 and code 11.
        let m = PathStateMetrics::compute(ComplexSample::new(1.0, 2.0));
        assert_eq!(m.errors[3], 4.0);
        assert_eq!(m.q4q3[3], 0);
    }
}
