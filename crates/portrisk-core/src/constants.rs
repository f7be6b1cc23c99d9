//! Shared constants for the port-risk analysis engine.

// ---- Likert scale ----

/// Lowest valid ordinal response.
pub const LIKERT_MIN: u8 = 1;

/// Highest valid ordinal response.
pub const LIKERT_MAX: u8 = 5;

/// Number of ordinal categories.
pub const LIKERT_CATEGORIES: usize = 5;

/// Scale midpoint used as the neutral threshold on both dispersion axes.
pub const DEFAULT_NEUTRAL_THRESHOLD: f64 = 3.0;

// ---- Classification defaults ----

pub const DEFAULT_CRITICAL_MEDIAN: f64 = 4.0;
pub const DEFAULT_CRITICAL_HIGH_SHARE: f64 = 50.0;
pub const DEFAULT_HIGH_MEDIAN: f64 = 3.5;
pub const DEFAULT_HIGH_HIGH_SHARE: f64 = 40.0;
pub const DEFAULT_MODERATE_HIGH_MEDIAN: f64 = 3.0;
pub const DEFAULT_MODERATE_HIGH_HIGH_SHARE: f64 = 30.0;
pub const DEFAULT_MODERATE_MEDIAN: f64 = 2.0;

/// Share (percent) of the modal category above which responses count as high consensus.
pub const DEFAULT_HIGH_CONSENSUS_SHARE: f64 = 70.0;

/// Median at or above which a variable is listed as a mitigation priority.
pub const PRIORITY_MEDIAN: f64 = 4.0;

// ---- Dispersion defaults ----

pub const DEFAULT_SIGNIFICANT_BAND: f64 = 0.5;
pub const DEFAULT_MODERATE_BAND: f64 = 0.2;
pub const DEFAULT_SLIGHT_BAND: f64 = 0.05;

/// Minimum number of matched pairs for correlation and aggregate statistics.
pub const MIN_PAIRS_FOR_AGGREGATES: usize = 2;

/// Labels selected per quadrant before density adjustment.
pub const DEFAULT_LABELS_PER_QUADRANT: usize = 6;

/// Upper bound on labelled points across all quadrants.
pub const DEFAULT_LABEL_LIMIT: usize = 30;

/// Top-N variables by variability reported per dimension.
pub const DIMENSION_TOP_N: usize = 3;

// ---- Tier colors ----

pub const COLOR_CRITICAL: &str = "#DC143C";
pub const COLOR_HIGH: &str = "#FF8C00";
pub const COLOR_MODERATE_HIGH: &str = "#FFD700";
pub const COLOR_MODERATE: &str = "#90EE90";
pub const COLOR_LOW: &str = "#228B22";

// ---- Input schema ----

pub const COLUMN_DIMENSION: &str = "dimension";
pub const COLUMN_VARIABLE_CODE: &str = "variable_code";
pub const COLUMN_PERIOD: &str = "period";
pub const COLUMN_RESPONSE: &str = "response";
pub const COLUMN_RESPONDENT: &str = "respondent";
pub const COLUMN_DESCRIPTION: &str = "description";

/// Columns that must be present for ingestion to begin.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COLUMN_DIMENSION,
    COLUMN_VARIABLE_CODE,
    COLUMN_PERIOD,
    COLUMN_RESPONSE,
];
