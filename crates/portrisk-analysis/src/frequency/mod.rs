//! Frequency analysis: ordinal statistics per (variable, period).
//!
//! Median and percentiles are order statistics of the sorted responses,
//! never interpolated unless the interpolated median convention is
//! configured. Mode ties go to the lowest category.

pub mod analyzer;
pub mod types;

pub use analyzer::FrequencyAnalyzer;
pub use types::{CategoryFrequency, ResponseSet, VariableStats};
