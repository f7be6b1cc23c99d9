//! Risk tier threshold configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Thresholds for the ordered tier rules. Medians are on the 1–5 scale,
/// shares are percentages of responses in {4, 5}.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClassificationConfig {
    pub critical_median: Option<f64>,
    pub critical_high_share: Option<f64>,
    pub high_median: Option<f64>,
    pub high_high_share: Option<f64>,
    pub moderate_high_median: Option<f64>,
    pub moderate_high_high_share: Option<f64>,
    pub moderate_median: Option<f64>,
}

impl ClassificationConfig {
    pub fn effective_critical_median(&self) -> f64 {
        self.critical_median.unwrap_or(DEFAULT_CRITICAL_MEDIAN)
    }

    pub fn effective_critical_high_share(&self) -> f64 {
        self.critical_high_share.unwrap_or(DEFAULT_CRITICAL_HIGH_SHARE)
    }

    pub fn effective_high_median(&self) -> f64 {
        self.high_median.unwrap_or(DEFAULT_HIGH_MEDIAN)
    }

    pub fn effective_high_high_share(&self) -> f64 {
        self.high_high_share.unwrap_or(DEFAULT_HIGH_HIGH_SHARE)
    }

    pub fn effective_moderate_high_median(&self) -> f64 {
        self.moderate_high_median.unwrap_or(DEFAULT_MODERATE_HIGH_MEDIAN)
    }

    pub fn effective_moderate_high_high_share(&self) -> f64 {
        self.moderate_high_high_share
            .unwrap_or(DEFAULT_MODERATE_HIGH_HIGH_SHARE)
    }

    pub fn effective_moderate_median(&self) -> f64 {
        self.moderate_median.unwrap_or(DEFAULT_MODERATE_MEDIAN)
    }

    /// Median thresholds from most to least severe rule.
    pub fn median_ladder(&self) -> [f64; 4] {
        [
            self.effective_critical_median(),
            self.effective_high_median(),
            self.effective_moderate_high_median(),
            self.effective_moderate_median(),
        ]
    }
}
