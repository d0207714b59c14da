use trellis_core::NormalisePolicy;

use crate::dsp_types::*;

/// Accumulated error per trellis state and the Add-Compare-Select step
/// that advances it.
#[derive(Debug, Clone)]
pub struct PathMetrics<const S: usize> {
    errors: [Metric; S],
    normalise: NormalisePolicy,
}

impl<const S: usize> PathMetrics<S> {
    pub fn new(normalise: NormalisePolicy) -> Self {
        let mut metrics = Self {
            errors: [METRIC_MAX; S],
            normalise,
        };
        metrics.reset();
        metrics
    }

    /// Encoder starts from state 0. Give that an initial metric of 0
    /// and every other state the maximum so they are not chosen.
    pub fn reset(&mut self) {
        self.errors = [METRIC_MAX; S];
        self.errors[0] = 0.0;
    }

    pub fn errors(&self) -> &[Metric; S] {
        &self.errors
    }

    pub fn normalise_policy(&self) -> NormalisePolicy {
        self.normalise
    }

    /// Advance all states by one trellis step.
    ///
    /// For each origin state and each of its branches (both in index order), the
    /// candidate `errors[origin] + branch_metric(origin, branch)` replaces the
    /// best value for `next_state[origin][branch]` only if strictly smaller, so
    /// on ties the first candidate encountered wins. The winning origin of each
    /// destination is written to `survivors`; destinations no candidate reaches
    /// keep their previous survivor entry.
    pub fn add_compare_select<const B: usize, F>(
        &mut self,
        next_state: &[[StateNum; B]; S],
        branch_metric: F,
        survivors: &mut [StateNum; S],
    ) where
        F: Fn(usize, usize) -> Metric,
    {
        // All destinations must see the previous step's errors
        let mut fresh = [METRIC_MAX; S];
        for (origin, branches) in next_state.iter().enumerate() {
            for (branch, &dest) in branches.iter().enumerate() {
                let candidate = self.errors[origin] + branch_metric(origin, branch);
                let dest = dest as usize;
                if candidate < fresh[dest] {
                    fresh[dest] = candidate;
                    survivors[dest] = origin as StateNum;
                }
            }
        }
        self.errors = fresh;

        if self.normalise.is_enabled() {
            let (_, min_error) = self.min_state();
            for error in self.errors.iter_mut() {
                *error -= min_error;
            }
        }
    }

    /// State with the smallest accumulated error, and that error.
    /// The lowest numbered state wins ties.
    pub fn min_state(&self) -> (usize, Metric) {
        let mut min_state = 0;
        let mut min_error = self.errors[0];
        for (state, &error) in self.errors.iter().enumerate().skip(1) {
            if error < min_error {
                min_error = error;
                min_state = state;
            }
        }
        (min_state, min_error)
    }
}
