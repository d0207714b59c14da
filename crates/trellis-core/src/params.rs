use crate::ViterbiInitErr;

/// Largest trace-back depth a decoder will accept.
pub const MAX_TRACE_BACK_DEPTH: usize = 4096;

/// Trace-back depth used when nothing else is configured, 5 * K for K = 3.
pub const DEFAULT_TRACE_BACK_DEPTH: usize = 15;

/// What to do with the accumulated error table after each Add-Compare-Select sweep.
///
/// Accumulated errors only ever grow. For long streams they may eventually lose
/// precision or overflow, which renormalisation avoids at the cost of one extra
/// pass over the table per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalisePolicy {
    /// Leave the table untouched
    #[default]
    Disabled,
    /// Subtract the smallest entry from every entry
    SubtractMinimum,
}

impl NormalisePolicy {
    pub fn from_flag(enabled: bool) -> Self {
        if enabled { NormalisePolicy::SubtractMinimum } else { NormalisePolicy::Disabled }
    }

    pub fn is_enabled(self) -> bool {
        self == NormalisePolicy::SubtractMinimum
    }
}

/// Parameters shared by all decoder variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViterbiParams {
    /// Number of steps walked back through the survivor history before a
    /// decision is committed. Also determines the decoding latency.
    pub trace_back_depth: usize,
    pub normalise: NormalisePolicy,
}

impl Default for ViterbiParams {
    fn default() -> Self {
        Self {
            trace_back_depth: DEFAULT_TRACE_BACK_DEPTH,
            normalise: NormalisePolicy::Disabled,
        }
    }
}

impl ViterbiParams {
    pub fn new(trace_back_depth: usize) -> Self {
        Self {
            trace_back_depth,
            ..Default::default()
        }
    }

    pub fn with_normalise(mut self, normalise: NormalisePolicy) -> Self {
        self.normalise = normalise;
        self
    }

    /// Number of slots in the survivor history ring
    #[inline]
    pub fn ring_capacity(&self) -> usize {
        self.trace_back_depth + 1
    }

    /// Checks `0 < trace_back_depth <= MAX_TRACE_BACK_DEPTH`.
    /// The ring always holds one slot more than the depth, so the depth is
    /// strictly smaller than the ring capacity whenever this passes.
    pub fn validate(&self) -> Result<(), ViterbiInitErr> {
        if self.trace_back_depth == 0 {
            return Err(ViterbiInitErr::TraceBackDepthZero);
        }
        if self.trace_back_depth > MAX_TRACE_BACK_DEPTH {
            return Err(ViterbiInitErr::TraceBackDepthTooLarge {
                depth: self.trace_back_depth,
                max: MAX_TRACE_BACK_DEPTH,
            });
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        let params = ViterbiParams::default();
        assert_eq!(params.trace_back_depth, 15);
        assert_eq!(params.normalise, NormalisePolicy::Disabled);
        assert_eq!(params.ring_capacity(), 16);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert_eq!(ViterbiParams::new(0).validate(), Err(ViterbiInitErr::TraceBackDepthZero));
    }

    #[test]
    fn test_depth_bounds() {
        assert!(ViterbiParams::new(1).validate().is_ok());
        assert!(ViterbiParams::new(MAX_TRACE_BACK_DEPTH).validate().is_ok());
        assert_eq!(
            ViterbiParams::new(MAX_TRACE_BACK_DEPTH + 1).validate(),
            Err(ViterbiInitErr::TraceBackDepthTooLarge { depth: MAX_TRACE_BACK_DEPTH + 1, max: MAX_TRACE_BACK_DEPTH })
        );
    }

    #[test]
    fn test_normalise_flag() {
        assert_eq!(NormalisePolicy::from_flag(true), NormalisePolicy::SubtractMinimum);
        assert!(!NormalisePolicy::from_flag(false).is_enabled());
        let params = ViterbiParams::new(20).with_normalise(NormalisePolicy::SubtractMinimum);
        assert!(params.normalise.is_enabled());
        assert_eq!(params.trace_back_depth, 20);
    }
}
