//! # portrisk-analysis
//!
//! Risk classification and temporal-correspondence engine for Likert
//! port-risk surveys.
//!
//! Dependency chain: Ingest → Frequency → Classification → Matching → Dispersion,
//! orchestrated by [`pipeline::RiskAnalysisPipeline`].

pub mod classification;
pub mod dispersion;
pub mod frequency;
pub mod ingest;
pub mod matching;
pub mod pipeline;

pub use classification::{RiskClassifier, RiskRecord, RiskTier};
pub use dispersion::{DispersionAnalysis, DispersionAnalyzer, DispersionPoint, Quadrant};
pub use frequency::{FrequencyAnalyzer, ResponseSet, VariableStats};
pub use ingest::{RawTable, ResponseTable};
pub use matching::{CoverageReport, CrossPeriodMatcher, MatchOutcome, MatchedPair};
pub use pipeline::{AnalysisReport, RiskAnalysisPipeline};
