//! Frequency analysis configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HIGH_CONSENSUS_SHARE;

/// How the median of an even-sized ordinal sample is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedianConvention {
    /// Lower of the two central order statistics. Always a scale point.
    #[default]
    Lower,
    /// Mean of the two central order statistics. Can land on a half point.
    Interpolated,
}

impl MedianConvention {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Interpolated => "interpolated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lower" => Some(Self::Lower),
            "interpolated" => Some(Self::Interpolated),
            _ => None,
        }
    }
}

impl fmt::Display for MedianConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for the per-variable statistics stage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Median convention for even sample sizes. Default: lower.
    pub median_convention: Option<MedianConvention>,
    /// Analyse variables on the rayon pool. Default: true.
    pub parallel: Option<bool>,
    /// Modal share (percent) above which a variable is high-consensus. Default: 70.0.
    pub high_consensus_share: Option<f64>,
}

impl AnalysisConfig {
    pub fn effective_median_convention(&self) -> MedianConvention {
        self.median_convention.unwrap_or_default()
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }

    pub fn effective_high_consensus_share(&self) -> f64 {
        self.high_consensus_share.unwrap_or(DEFAULT_HIGH_CONSENSUS_SHARE)
    }
}
