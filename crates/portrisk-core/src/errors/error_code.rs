//! RiskErrorCode trait for report consumers.

/// Every error enum implements this to provide a stable, structured
/// error code string for the reporting layer.
pub trait RiskErrorCode {
    /// Returns the error code string (e.g., "EMPTY_INPUT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted diagnostic string: `[ERROR_CODE] message`.
    fn diagnostic_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const INGEST_ERROR: &str = "INGEST_ERROR";
pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
pub const MALFORMED_ROW: &str = "MALFORMED_ROW";
pub const EMPTY_INPUT: &str = "EMPTY_INPUT";
pub const INSUFFICIENT_DATA: &str = "INSUFFICIENT_DATA";
pub const UNDEFINED_CORRELATION: &str = "UNDEFINED_CORRELATION";
pub const AMBIGUOUS_MATCH: &str = "AMBIGUOUS_MATCH";
pub const MATCH_ERROR: &str = "MATCH_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
