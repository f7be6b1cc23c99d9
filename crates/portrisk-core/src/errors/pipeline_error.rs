//! Pipeline errors and non-fatal error collection.

use super::error_code::RiskErrorCode;
use super::{AnalysisError, ConfigError, IngestError, MatchError};

/// Errors that can occur during a pipeline run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Match error: {0}")]
    Match(#[from] MatchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RiskErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Ingest(e) => e.error_code(),
            Self::Analysis(e) => e.error_code(),
            Self::Match(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Result of a pipeline run that accumulates non-fatal errors.
/// Partial results are returned even when some variables or pairs fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: impl Into<PipelineError>) {
        self.errors.push(error.into());
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Count collected errors carrying the given code.
    pub fn count_code(&self, code: &str) -> usize {
        self.errors.iter().filter(|e| e.error_code() == code).count()
    }
}
