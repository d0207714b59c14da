use trellis_core::{ViterbiInitErr, ViterbiParams, assert_warn};

use crate::dsp_types::*;
use crate::engine::{PathMetrics, SurvivorRing};

use super::branch_metrics::PathStateMetrics;
use super::differential::diff_decode;
use super::tables::*;

/// Survivor history entry for one received symbol
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct V32Slot {
    /// Winning predecessor of every trellis state
    pub survivors: [StateNum; NUM_STATES],
    /// Nearest sub-state of every path state, in Q4Q3 position
    pub q4q3: [u8; NUM_PATH_STATES],
}

/// Streaming Viterbi decoder for the 8-state V.32 style trellis code.
///
/// Every received symbol yields one nibble once the decoder is armed. The
/// nibble belongs to the symbol received `trace_back_depth - 1` symbols earlier.
pub struct V32Decoder {
    metrics: PathMetrics<NUM_STATES>,
    ring: SurvivorRing<V32Slot>,
    /// Previously received differentially encoded dibit
    diff_state: u8,
    /// Low nibble waiting for its high nibble in `decode_byte()`
    pending_nibble: Option<u8>,
    /// Steps since init, for logging only
    step: u64,
}

impl V32Decoder {
    pub fn new(params: ViterbiParams) -> Result<Self, ViterbiInitErr> {
        let ring = SurvivorRing::new(&params)?;
        Ok(Self {
            metrics: PathMetrics::new(params.normalise),
            ring,
            diff_state: 0,
            pending_nibble: None,
            step: 0,
        })
    }

    /// Return to the freshly constructed state.
    pub fn init(&mut self) {
        self.metrics.reset();
        self.ring.reset();
        self.diff_state = 0;
        self.pending_nibble = None;
        self.step = 0;
        tracing::debug!("V32 decoder reset, trace-back depth {}", self.ring.trace_back_depth());
    }

    pub fn is_armed(&self) -> bool {
        self.ring.is_armed()
    }

    pub fn trace_back_depth(&self) -> usize {
        self.ring.trace_back_depth()
    }

    pub fn accumulated_errors(&self) -> &[Metric; NUM_STATES] {
        self.metrics.errors()
    }

    pub fn diff_state(&self) -> u8 {
        self.diff_state
    }

    /// Feed one received symbol. Returns a decoded nibble once armed.
    pub fn decode(&mut self, sample: ComplexSample) -> Option<u8> {
        self.step += 1;
        if self.ring.advance() {
            tracing::debug!(step = self.step, "V32 decoder armed");
        }

        let path_metrics = PathStateMetrics::compute(sample);
        let slot = self.ring.current_mut();
        slot.q4q3 = path_metrics.q4q3;
        self.metrics.add_compare_select(
            &NEXT_STATE,
            |origin, branch| path_metrics.errors[path_state(origin, branch)],
            &mut slot.survivors,
        );
        tracing::trace!(step = self.step, "in {:.2} +j{:.2} path err {:.2?} q4q3 {:?}",
            sample.re, sample.im, path_metrics.errors, path_metrics.q4q3);
        tracing::trace!(step = self.step, "acc err {:.2?} surv {:?}", self.metrics.errors(), self.ring.slot(0).survivors);

        if !self.ring.is_armed() {
            return None;
        }

        let (final_state, min_error) = self.metrics.min_state();
        let tb = self.ring.trace_back(final_state, |slot, state| slot.survivors[state] as usize);

        let transmitted_path = STATE_TRANSITION[tb.state][tb.successor];
        assert_warn!(transmitted_path != INVALID_TRANSITION, "no V32 transition {} -> {}", tb.state, tb.successor);
        let transmitted_path = if transmitted_path == INVALID_TRANSITION { 0 } else { transmitted_path };

        // Branch dibit from the path state, Q4Q3 from the recorded nearest sub-state
        let symbol = (transmitted_path >> 1) | tb.entry.q4q3[transmitted_path as usize];
        let nibble = diff_decode(symbol, self.diff_state) | (symbol & 0x0c);
        self.diff_state = symbol & 0x3;

        tracing::trace!(step = self.step, "min state {} err {:.2e}, path {} symbol {:#x} -> {:#x}",
            final_state, min_error, transmitted_path, symbol, nibble);
        Some(nibble)
    }

    /// Feed the two symbols of one byte, low nibble first.
    /// Returns a byte once both of its nibbles have been decoded.
    pub fn decode_byte(&mut self, samples: [ComplexSample; 2]) -> Option<u8> {
        let mut output = None;
        for sample in samples {
            let Some(nibble) = self.decode(sample) else {
                continue;
            };
            match self.pending_nibble.take() {
                None => self.pending_nibble = Some(nibble),
                Some(lo) => output = Some(lo | (nibble << 4)),
            }
        }
        output
    }
}
