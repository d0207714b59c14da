pub mod path_metrics;
pub mod survivor_ring;

pub use path_metrics::PathMetrics;
pub use survivor_ring::{SurvivorRing, TraceBack};
