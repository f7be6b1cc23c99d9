//! Core types for temporal dispersion.

use std::fmt;

use serde::{Deserialize, Serialize};

use portrisk_core::constants::{
    DEFAULT_MODERATE_BAND, DEFAULT_SIGNIFICANT_BAND, DEFAULT_SLIGHT_BAND,
};
use portrisk_core::errors::AnalysisError;
use portrisk_core::types::Dimension;

use crate::classification::RiskTier;

/// Position of a pair relative to the neutral threshold on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// Both periods ≥ threshold: persistently elevated.
    Chronic,
    /// Earlier < threshold, later ≥ threshold: worsening.
    Emerging,
    /// Both periods < threshold: persistently low.
    Controlled,
    /// Earlier ≥ threshold, later < threshold: declining risk.
    Improving,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Self::Chronic,
        Self::Emerging,
        Self::Controlled,
        Self::Improving,
    ];

    pub fn classify(earlier_median: f64, later_median: f64, threshold: f64) -> Self {
        match (earlier_median >= threshold, later_median >= threshold) {
            (true, true) => Self::Chronic,
            (false, true) => Self::Emerging,
            (false, false) => Self::Controlled,
            (true, false) => Self::Improving,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Chronic => "chronic",
            Self::Emerging => "emerging",
            Self::Controlled => "controlled",
            Self::Improving => "improving",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Chronic => "persistently elevated",
            Self::Emerging => "worsening",
            Self::Controlled => "persistently low",
            Self::Improving => "declining risk",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Qualitative direction of a median shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    SignificantWorsening,
    ModerateWorsening,
    SlightChange,
    Stable,
    ModerateImprovement,
    SignificantImprovement,
}

impl TrendLabel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignificantWorsening => "significant worsening",
            Self::ModerateWorsening => "moderate worsening",
            Self::SlightChange => "slight change",
            Self::Stable => "stable",
            Self::ModerateImprovement => "moderate improvement",
            Self::SignificantImprovement => "significant improvement",
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Delta thresholds for `TrendLabel`. Symmetric around zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendBands {
    pub significant: f64,
    pub moderate: f64,
    pub slight: f64,
}

impl Default for TrendBands {
    fn default() -> Self {
        Self {
            significant: DEFAULT_SIGNIFICANT_BAND,
            moderate: DEFAULT_MODERATE_BAND,
            slight: DEFAULT_SLIGHT_BAND,
        }
    }
}

impl TrendBands {
    pub fn classify(&self, delta: f64) -> TrendLabel {
        if delta >= self.significant {
            TrendLabel::SignificantWorsening
        } else if delta >= self.moderate {
            TrendLabel::ModerateWorsening
        } else if delta <= -self.significant {
            TrendLabel::SignificantImprovement
        } else if delta <= -self.moderate {
            TrendLabel::ModerateImprovement
        } else if delta.abs() > self.slight {
            TrendLabel::SlightChange
        } else {
            TrendLabel::Stable
        }
    }
}

/// Interpretation of Pearson's r.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    StrongPositive,
    ModeratePositive,
    Weak,
    Negative,
}

impl CorrelationStrength {
    pub fn from_r(r: f64) -> Self {
        if r > 0.7 {
            Self::StrongPositive
        } else if r > 0.3 {
            Self::ModeratePositive
        } else if r > -0.3 {
            Self::Weak
        } else {
            Self::Negative
        }
    }
}

/// One matched pair in the dispersion plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionPoint {
    pub dimension: Dimension,
    pub code: String,
    /// Differs from `code` only for description matches.
    pub later_code: String,
    pub description: Option<String>,
    pub earlier_median: f64,
    pub later_median: f64,
    pub delta: f64,
    pub abs_delta: f64,
    /// `(earlier_median + later_median) / 2`.
    pub combined_median: f64,
    pub quadrant: Quadrant,
    /// Mean of the two periods' IQRs.
    pub variability: f64,
    pub trend: TrendLabel,
    pub earlier_tier: RiskTier,
    pub later_tier: RiskTier,
    /// Selected for labelling in downstream scatter plots.
    pub labelled: bool,
}

/// Aggregates over the per-pair medians. Present only with at least two pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionSummary {
    pub pairs: usize,
    pub earlier_mean: f64,
    /// Population standard deviation.
    pub earlier_std: f64,
    pub later_mean: f64,
    pub later_std: f64,
    pub mean_delta: f64,
    /// `None` when either series has zero variance.
    pub correlation: Option<f64>,
    pub correlation_strength: Option<CorrelationStrength>,
    /// Two-sided p-value of r under the t distribution with n−2 degrees of freedom.
    pub correlation_p_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantCount {
    pub quadrant: Quadrant,
    pub count: usize,
    pub percentage: f64,
}

/// Per-dimension rollup of matched pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionTrend {
    pub dimension: Dimension,
    pub pairs: usize,
    pub mean_earlier: f64,
    pub mean_later: f64,
    pub mean_delta: f64,
    pub trend: TrendLabel,
    /// Codes with the highest variability, most variable first.
    pub most_variable: Vec<String>,
}

/// Full dispersion output. `errors` holds the non-fatal aggregate failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispersionAnalysis {
    pub points: Vec<DispersionPoint>,
    pub summary: Option<DispersionSummary>,
    pub quadrants: Vec<QuadrantCount>,
    pub dimensions: Vec<DimensionTrend>,
    pub errors: Vec<AnalysisError>,
}

impl DispersionAnalysis {
    pub fn quadrant_count(&self, quadrant: Quadrant) -> usize {
        self.quadrants
            .iter()
            .find(|q| q.quadrant == quadrant)
            .map(|q| q.count)
            .unwrap_or(0)
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionTrend> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    pub fn labelled(&self) -> impl Iterator<Item = &DispersionPoint> {
        self.points.iter().filter(|p| p.labelled)
    }
}
