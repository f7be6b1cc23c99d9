//! Cross-period matching: pairs the same logical variable across two horizons.
//!
//! Primary key: `(dimension, code)`. Fallback: `(dimension, normalized
//! description)` by exact equality after normalization. No fuzzy scoring.
//! Ambiguity never resolves to a guess; every record involved stays unmatched.

pub mod matcher;
pub mod normalize;
pub mod types;

pub use matcher::CrossPeriodMatcher;
pub use normalize::normalize_description;
pub use types::{CoverageReport, DimensionCoverage, MatchMethod, MatchOutcome, MatchedPair};
