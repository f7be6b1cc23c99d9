//! Temporal dispersion: projects matched pairs onto the
//! (earlier median, later median) plane.
//!
//! Aggregates here run over per-variable medians, not raw responses, so
//! mean, standard deviation and Pearson's r are meaningful.

pub mod analyzer;
pub mod labels;
pub mod types;

pub use analyzer::DispersionAnalyzer;
pub use labels::select_labels;
pub use types::{
    CorrelationStrength, DimensionTrend, DispersionAnalysis, DispersionPoint, DispersionSummary,
    Quadrant, QuadrantCount, TrendBands, TrendLabel,
};
