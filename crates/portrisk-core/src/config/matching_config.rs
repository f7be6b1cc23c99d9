//! Cross-period matching configuration.

use serde::{Deserialize, Serialize};

use crate::types::Period;

/// Which periods to pair and how.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MatchingConfig {
    /// Period on the x axis of the dispersion plane. Default: short_term.
    pub earlier_period: Option<Period>,
    /// Period on the y axis of the dispersion plane. Default: long_term.
    pub later_period: Option<Period>,
    /// Fall back to (dimension, normalized description) when codes differ. Default: true.
    pub description_fallback: Option<bool>,
}

impl MatchingConfig {
    pub fn effective_earlier_period(&self) -> Period {
        self.earlier_period.unwrap_or(Period::ShortTerm)
    }

    pub fn effective_later_period(&self) -> Period {
        self.later_period.unwrap_or(Period::LongTerm)
    }

    pub fn effective_description_fallback(&self) -> bool {
        self.description_fallback.unwrap_or(true)
    }
}
