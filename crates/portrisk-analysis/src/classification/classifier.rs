//! First-match-wins tier rules.
//!
//! Rules run most severe first so a looser lower-tier rule can never
//! shadow a stricter one:
//!
//! | Tier         | median ≥ | share of {4,5} > |
//! |--------------|----------|------------------|
//! | Critical     | 4.0      | 50%              |
//! | High         | 3.5      | 40%              |
//! | ModerateHigh | 3.0      | 30%              |
//! | Moderate     | 2.0      | -                |
//! | Low          | fallback |                  |

use portrisk_core::config::ClassificationConfig;
use portrisk_core::constants::{
    DEFAULT_CRITICAL_HIGH_SHARE, DEFAULT_CRITICAL_MEDIAN, DEFAULT_HIGH_HIGH_SHARE,
    DEFAULT_HIGH_MEDIAN, DEFAULT_MODERATE_HIGH_HIGH_SHARE, DEFAULT_MODERATE_HIGH_MEDIAN,
    DEFAULT_MODERATE_MEDIAN,
};

use super::types::{RiskRecord, RiskTier};
use crate::frequency::VariableStats;

/// One tier rule. `min_high_share` of `None` means the rule only looks at the median.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TierRule {
    tier: RiskTier,
    min_median: f64,
    min_high_share: Option<f64>,
}

impl TierRule {
    fn matches(&self, median: f64, high_share: f64) -> bool {
        median >= self.min_median && self.min_high_share.map_or(true, |s| high_share > s)
    }
}

/// Maps `VariableStats` to a `RiskTier`. Never fails; `Low` is the
/// exhaustive fallback.
#[derive(Debug, Clone)]
pub struct RiskClassifier {
    rules: [TierRule; 4],
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::from_config(&ClassificationConfig::default())
    }
}

impl RiskClassifier {
    pub fn from_config(config: &ClassificationConfig) -> Self {
        Self {
            rules: [
                TierRule {
                    tier: RiskTier::Critical,
                    min_median: config.effective_critical_median(),
                    min_high_share: Some(config.effective_critical_high_share()),
                },
                TierRule {
                    tier: RiskTier::High,
                    min_median: config.effective_high_median(),
                    min_high_share: Some(config.effective_high_high_share()),
                },
                TierRule {
                    tier: RiskTier::ModerateHigh,
                    min_median: config.effective_moderate_high_median(),
                    min_high_share: Some(config.effective_moderate_high_high_share()),
                },
                TierRule {
                    tier: RiskTier::Moderate,
                    min_median: config.effective_moderate_median(),
                    min_high_share: None,
                },
            ],
        }
    }

    pub fn classify(&self, stats: &VariableStats) -> RiskTier {
        self.classify_values(stats.median, stats.high_share)
    }

    /// Classify from the two inputs the rules read: the median and the
    /// percentage of responses in {4, 5}.
    pub fn classify_values(&self, median: f64, high_share: f64) -> RiskTier {
        self.rules
            .iter()
            .find(|rule| rule.matches(median, high_share))
            .map(|rule| rule.tier)
            .unwrap_or(RiskTier::Low)
    }

    /// Re-run classification on existing records. Returns fresh records;
    /// inputs are untouched.
    pub fn reclassify(&self, records: &[RiskRecord]) -> Vec<RiskRecord> {
        records
            .iter()
            .map(|r| {
                RiskRecord::new(
                    r.key.clone(),
                    r.description.clone(),
                    r.stats.clone(),
                    self.classify(&r.stats),
                )
            })
            .collect()
    }

    /// Default thresholds as `(tier, median, share)` rows, for report legends.
    pub fn default_thresholds() -> [(RiskTier, f64, Option<f64>); 4] {
        [
            (RiskTier::Critical, DEFAULT_CRITICAL_MEDIAN, Some(DEFAULT_CRITICAL_HIGH_SHARE)),
            (RiskTier::High, DEFAULT_HIGH_MEDIAN, Some(DEFAULT_HIGH_HIGH_SHARE)),
            (
                RiskTier::ModerateHigh,
                DEFAULT_MODERATE_HIGH_MEDIAN,
                Some(DEFAULT_MODERATE_HIGH_HIGH_SHARE),
            ),
            (RiskTier::Moderate, DEFAULT_MODERATE_MEDIAN, None),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_boundaries() {
        let c = RiskClassifier::default();
        assert_eq!(c.classify_values(4.0, 50.1), RiskTier::Critical);
        // Share must be strictly greater.
        assert_eq!(c.classify_values(4.0, 50.0), RiskTier::High);
        assert_eq!(c.classify_values(3.5, 40.0), RiskTier::ModerateHigh);
        assert_eq!(c.classify_values(3.0, 30.0), RiskTier::Moderate);
        assert_eq!(c.classify_values(2.0, 0.0), RiskTier::Moderate);
        assert_eq!(c.classify_values(1.0, 0.0), RiskTier::Low);
    }

    #[test]
    fn test_high_median_low_share_falls_through() {
        let c = RiskClassifier::default();
        assert_eq!(c.classify_values(5.0, 10.0), RiskTier::Moderate);
    }

    #[test]
    fn test_default_thresholds_match_default_rules() {
        let c = RiskClassifier::default();
        for ((tier, median, share), rule) in RiskClassifier::default_thresholds().iter().zip(c.rules.iter()) {
            assert_eq!(*tier, rule.tier);
            assert_eq!(*median, rule.min_median);
            assert_eq!(*share, rule.min_high_share);
        }
    }
}
