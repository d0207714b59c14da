use trellis_core::{ViterbiInitErr, ViterbiParams, assert_warn};

use crate::dsp_types::*;
use crate::engine::{PathMetrics, SurvivorRing};

use super::tables::*;

/// Survivor history entry: winning predecessor for every state
type SurvivorSlot = [StateNum; NUM_STATES];

/// Squared Euclidean distance between a received sample pair and an ideal one.
/// No square root, the ordering is all that matters.
#[inline]
pub fn branch_metric(ideal: &[RealSample; SAMPLES_PER_BIT], received: [RealSample; SAMPLES_PER_BIT]) -> Metric {
    let d0 = ideal[0] - received[0];
    let d1 = ideal[1] - received[1];
    d0 * d0 + d1 * d1
}

/// Streaming Viterbi decoder for the K=3, rate 1/2 code.
///
/// Decoded bits come out `trace_back_depth - 1` bit periods after the
/// corresponding sample pair went in. Bits are assembled LSB first into bytes.
pub struct K3Decoder {
    metrics: PathMetrics<NUM_STATES>,
    ring: SurvivorRing<SurvivorSlot>,
    /// Number of bits already placed in `decoded_byte`
    output_bit_count: u32,
    decoded_byte: u8,
    /// Steps since init, for logging only
    step: u64,
}

impl K3Decoder {
    pub fn new(params: ViterbiParams) -> Result<Self, ViterbiInitErr> {
        let ring = SurvivorRing::new(&params)?;
        Ok(Self {
            metrics: PathMetrics::new(params.normalise),
            ring,
            output_bit_count: 0,
            decoded_byte: 0,
            step: 0,
        })
    }

    /// Return to the freshly constructed state.
    pub fn init(&mut self) {
        self.metrics.reset();
        self.ring.reset();
        self.output_bit_count = 0;
        self.decoded_byte = 0;
        self.step = 0;
        tracing::debug!("K3 decoder reset, trace-back depth {}", self.ring.trace_back_depth());
    }

    /// True once enough history has been collected to make decisions
    pub fn is_armed(&self) -> bool {
        self.ring.is_armed()
    }

    pub fn trace_back_depth(&self) -> usize {
        self.ring.trace_back_depth()
    }

    pub fn accumulated_errors(&self) -> &[Metric; NUM_STATES] {
        self.metrics.errors()
    }

    /// Run one trellis step on the sample pair of one encoded bit.
    /// Returns the decided bit once armed, None while warming up.
    /// Bits returned here bypass the byte assembly of `decode_byte()`.
    pub fn step(&mut self, sample: [RealSample; SAMPLES_PER_BIT]) -> Option<u8> {
        self.step += 1;
        if self.ring.advance() {
            tracing::debug!(step = self.step, "K3 decoder armed");
        }

        // Add, compare, select
        let survivors = self.ring.current_mut();
        self.metrics.add_compare_select(
            &NEXT_STATE,
            |origin, branch| branch_metric(&IDEAL_SYMBOL[origin][branch], sample),
            survivors,
        );
        tracing::trace!(step = self.step, "in {:.2}, {:.2} err {:.2?} surv {:?}",
            sample[0], sample[1], self.metrics.errors(), self.ring.slot(0));

        if !self.ring.is_armed() {
            return None;
        }

        let (final_state, min_error) = self.metrics.min_state();
        let tb = self.ring.trace_back(final_state, |slot, state| slot[state] as usize);

        let bit = STATE_TRANSITION[tb.state][tb.successor];
        assert_warn!(bit != INVALID_TRANSITION, "no K3 transition {} -> {}", tb.state, tb.successor);
        tracing::trace!(step = self.step, "min state {} err {:.2e}, decided {} -> {}: {}",
            final_state, min_error, tb.state, tb.successor, bit);

        Some(bit & 1)
    }

    /// Decode the 16 samples (8 sample pairs) of one encoded byte.
    /// Returns a byte if one was completed during this call.
    pub fn decode_byte(&mut self, samples: &[RealSample; SAMPLES_PER_BYTE]) -> Option<u8> {
        let mut output = None;
        for pair in samples.chunks_exact(SAMPLES_PER_BIT) {
            let Some(bit) = self.step([pair[0], pair[1]]) else {
                continue;
            };
            self.decoded_byte |= bit << self.output_bit_count;
            self.output_bit_count += 1;
            if self.output_bit_count >= 8 {
                output = Some(self.decoded_byte);
                self.output_bit_count = 0;
                self.decoded_byte = 0;
            }
        }
        output
    }
}
