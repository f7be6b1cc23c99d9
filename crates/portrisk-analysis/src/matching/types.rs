//! Matched pairs, unmatched residue and coverage diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

use portrisk_core::errors::MatchError;
use portrisk_core::types::{Dimension, Period};

use crate::classification::RiskRecord;

/// Which key produced a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Same `(dimension, code)`.
    Code,
    /// Same `(dimension, normalized description)`, codes differed.
    Description,
}

impl MatchMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The same logical variable in two periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPair {
    pub dimension: Dimension,
    /// The code for code matches, the normalized description otherwise.
    pub correspondence_key: String,
    pub method: MatchMethod,
    pub earlier: RiskRecord,
    pub later: RiskRecord,
    /// `later.median - earlier.median`.
    pub delta: f64,
}

impl MatchedPair {
    pub fn new(
        correspondence_key: impl Into<String>,
        method: MatchMethod,
        earlier: RiskRecord,
        later: RiskRecord,
    ) -> Self {
        Self {
            dimension: earlier.dimension(),
            correspondence_key: correspondence_key.into(),
            method,
            delta: later.median() - earlier.median(),
            earlier,
            later,
        }
    }

    /// Code used to identify the pair in reports: the earlier record's code.
    pub fn code(&self) -> &str {
        self.earlier.code()
    }
}

/// Reconciliation counts for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionCoverage {
    pub dimension: Dimension,
    pub earlier_records: usize,
    pub later_records: usize,
    pub matched: usize,
    pub unmatched_earlier: usize,
    pub unmatched_later: usize,
    /// `min(earlier_records, later_records)`.
    pub intended: usize,
    /// `matched / intended * 100`; 100 when the dimension is empty on both sides.
    pub coverage_pct: f64,
}

impl DimensionCoverage {
    pub fn is_complete(&self) -> bool {
        self.unmatched_earlier == 0 && self.unmatched_later == 0
    }
}

/// Overall reconciliation report. Any gap is a data-quality defect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub total_matched: usize,
    pub unmatched_earlier: usize,
    pub unmatched_later: usize,
    pub intended: usize,
    pub coverage_pct: f64,
    pub matched_by_code: usize,
    pub matched_by_description: usize,
    pub ambiguous: usize,
    pub per_dimension: Vec<DimensionCoverage>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.unmatched_earlier == 0 && self.unmatched_later == 0
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionCoverage> {
        self.per_dimension.iter().find(|d| d.dimension == dimension)
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} pairs matched ({:.1}%), {} unmatched earlier, {} unmatched later",
            self.total_matched,
            self.intended,
            self.coverage_pct,
            self.unmatched_earlier,
            self.unmatched_later
        )
    }
}

/// Everything the matcher produced for one pair of periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub earlier_period: Period,
    pub later_period: Period,
    pub pairs: Vec<MatchedPair>,
    pub unmatched_earlier: Vec<RiskRecord>,
    pub unmatched_later: Vec<RiskRecord>,
    pub ambiguities: Vec<MatchError>,
    pub coverage: CoverageReport,
}

impl Default for MatchOutcome {
    fn default() -> Self {
        Self {
            earlier_period: Period::ShortTerm,
            later_period: Period::LongTerm,
            pairs: Vec::new(),
            unmatched_earlier: Vec::new(),
            unmatched_later: Vec::new(),
            ambiguities: Vec::new(),
            coverage: CoverageReport::default(),
        }
    }
}
