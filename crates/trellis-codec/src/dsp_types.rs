//! Data types used for signal processing

pub type RealSample = f64;

pub type ComplexSample = num_complex::Complex<RealSample>;

/// Squared Euclidean distance, summed along a trellis path.
pub type Metric = f64;

/// Initial accumulated error of states the encoder cannot be in yet.
/// Small branch metrics vanish when added to it, so a path starting from such
/// a state never beats one starting from a reachable state.
pub const METRIC_MAX: Metric = 1.0e30;

/// Trellis state number, stored compactly in survivor history
pub type StateNum = u8;
