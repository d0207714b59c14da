use core::fmt;

/// Reasons a decoder refuses to be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViterbiInitErr {
    /// Trace-back needs at least one step of history
    TraceBackDepthZero,
    /// Depth exceeds what the survivor ring may be sized for
    TraceBackDepthTooLarge { depth: usize, max: usize },
}

impl fmt::Display for ViterbiInitErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViterbiInitErr::TraceBackDepthZero => {
                write!(f, "trace-back depth must be at least 1")
            }
            ViterbiInitErr::TraceBackDepthTooLarge { depth, max } => {
                write!(f, "trace-back depth {} exceeds maximum of {}", depth, max)
            }
        }
    }
}

impl std::error::Error for ViterbiInitErr {}
