//! Temporal dispersion configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Quadrant threshold, trend bands, and label selection limits.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DispersionConfig {
    /// Neutral threshold on both axes. Default: 3.0 (scale midpoint).
    pub neutral_threshold: Option<f64>,
    /// |delta| at or above which a change is significant. Default: 0.5.
    pub significant_band: Option<f64>,
    /// |delta| at or above which a change is moderate. Default: 0.2.
    pub moderate_band: Option<f64>,
    /// |delta| above which a change is slight rather than stable. Default: 0.05.
    pub slight_band: Option<f64>,
    /// Labelled points per quadrant before density adjustment. Default: 6.
    pub labels_per_quadrant: Option<usize>,
    /// Total labelled points. Default: 30.
    pub label_limit: Option<usize>,
}

impl DispersionConfig {
    pub fn effective_neutral_threshold(&self) -> f64 {
        self.neutral_threshold.unwrap_or(DEFAULT_NEUTRAL_THRESHOLD)
    }

    pub fn effective_significant_band(&self) -> f64 {
        self.significant_band.unwrap_or(DEFAULT_SIGNIFICANT_BAND)
    }

    pub fn effective_moderate_band(&self) -> f64 {
        self.moderate_band.unwrap_or(DEFAULT_MODERATE_BAND)
    }

    pub fn effective_slight_band(&self) -> f64 {
        self.slight_band.unwrap_or(DEFAULT_SLIGHT_BAND)
    }

    pub fn effective_labels_per_quadrant(&self) -> usize {
        self.labels_per_quadrant.unwrap_or(DEFAULT_LABELS_PER_QUADRANT)
    }

    pub fn effective_label_limit(&self) -> usize {
        self.label_limit.unwrap_or(DEFAULT_LABEL_LIMIT)
    }
}
