//! Per-variable and aggregate statistics errors.

use serde::{Deserialize, Serialize};

use super::error_code::{self, RiskErrorCode};

/// Recoverable statistics failures. Each is scoped to one variable or one
/// aggregate and never aborts the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum AnalysisError {
    /// No valid responses remained for a variable after null filtering.
    #[error("No valid responses for {variable}")]
    EmptyInput { variable: String },

    /// An aggregate needs more data points than were available.
    #[error("Insufficient data for {statistic}: need at least {required}, got {available}")]
    InsufficientData {
        statistic: String,
        required: usize,
        available: usize,
    },

    /// Pearson's r is undefined because one series has zero variance.
    #[error("Correlation undefined: {series} medians have zero variance")]
    UndefinedCorrelation { series: String },
}

impl RiskErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyInput { .. } => error_code::EMPTY_INPUT,
            Self::InsufficientData { .. } => error_code::INSUFFICIENT_DATA,
            Self::UndefinedCorrelation { .. } => error_code::UNDEFINED_CORRELATION,
        }
    }
}
