//! Cross-period matching errors.

use serde::{Deserialize, Serialize};

use super::error_code::{self, RiskErrorCode};

/// Errors raised while pairing variables across periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum MatchError {
    /// More than one candidate satisfied the key. Every record involved is
    /// reported unmatched.
    #[error("Ambiguous {method} match in {dimension} for key '{key}': {earlier_candidates} earlier vs {later_candidates} later candidates")]
    Ambiguous {
        dimension: String,
        key: String,
        method: String,
        earlier_candidates: usize,
        later_candidates: usize,
    },

    /// The two periods to compare are the same.
    #[error("Cannot match period {period} against itself")]
    SamePeriod { period: String },
}

impl RiskErrorCode for MatchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Ambiguous { .. } => error_code::AMBIGUOUS_MATCH,
            Self::SamePeriod { .. } => error_code::MATCH_ERROR,
        }
    }
}
