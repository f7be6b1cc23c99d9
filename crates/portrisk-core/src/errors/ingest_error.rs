//! Ingestion errors.

use serde::{Deserialize, Serialize};

use super::error_code::{self, RiskErrorCode};

/// Errors raised while validating the response table against its schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum IngestError {
    /// Structural: a required column is absent. Aborts the whole run.
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    /// A row failed validation and was skipped.
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// A wide-format header could not be parsed into code and period.
    #[error("Unrecognized variable column header: {header}")]
    UnrecognizedHeader { header: String },
}

impl IngestError {
    /// Only structural errors abort ingestion.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }
}

impl RiskErrorCode for IngestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn { .. } => error_code::MISSING_COLUMN,
            Self::MalformedRow { .. } => error_code::MALFORMED_ROW,
            Self::UnrecognizedHeader { .. } => error_code::INGEST_ERROR,
        }
    }
}
