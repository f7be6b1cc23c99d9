//! Risk tiers and classified records.

use std::fmt;

use serde::{Deserialize, Serialize};

use portrisk_core::constants::{
    COLOR_CRITICAL, COLOR_HIGH, COLOR_LOW, COLOR_MODERATE, COLOR_MODERATE_HIGH,
};
use portrisk_core::types::{Dimension, Period, VariableKey};

use crate::frequency::VariableStats;

/// Ordered risk severity. `Low < Moderate < ModerateHigh < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    ModerateHigh,
    High,
    Critical,
}

impl RiskTier {
    /// All tiers, most severe first (rule evaluation order).
    pub const BY_SEVERITY: [RiskTier; 5] = [
        Self::Critical,
        Self::High,
        Self::ModerateHigh,
        Self::Moderate,
        Self::Low,
    ];

    /// 1 (Low) through 5 (Critical).
    pub fn severity_rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Moderate => 2,
            Self::ModerateHigh => 3,
            Self::High => 4,
            Self::Critical => 5,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Critical => COLOR_CRITICAL,
            Self::High => COLOR_HIGH,
            Self::ModerateHigh => COLOR_MODERATE_HIGH,
            Self::Moderate => COLOR_MODERATE,
            Self::Low => COLOR_LOW,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::ModerateHigh => "Moderate-High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        }
    }

    /// Report heading form, e.g. `"MODERATE-HIGH RISK"`.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL RISK",
            Self::High => "HIGH RISK",
            Self::ModerateHigh => "MODERATE-HIGH RISK",
            Self::Moderate => "MODERATE RISK",
            Self::Low => "LOW RISK",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One classified variable in one dimension and one period.
/// Self-describing for renderers: carries the tier's display label and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub key: VariableKey,
    pub description: Option<String>,
    pub stats: VariableStats,
    pub tier: RiskTier,
    pub severity_label: String,
    pub color: String,
}

impl RiskRecord {
    pub fn new(
        key: VariableKey,
        description: Option<String>,
        stats: VariableStats,
        tier: RiskTier,
    ) -> Self {
        Self {
            key,
            description,
            stats,
            tier,
            severity_label: tier.display_label().to_string(),
            color: tier.color().to_string(),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.key.dimension
    }

    pub fn code(&self) -> &str {
        &self.key.code
    }

    pub fn period(&self) -> Period {
        self.key.period
    }

    pub fn median(&self) -> f64 {
        self.stats.median
    }
}

/// Count records per tier.
pub fn tier_distribution<'a>(records: impl IntoIterator<Item = &'a RiskRecord>) -> TierDistribution {
    let mut dist = TierDistribution::default();
    for r in records {
        dist.add(r.tier);
    }
    dist
}

/// Number of records per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDistribution {
    pub critical: usize,
    pub high: usize,
    pub moderate_high: usize,
    pub moderate: usize,
    pub low: usize,
}

impl TierDistribution {
    pub fn add(&mut self, tier: RiskTier) {
        match tier {
            RiskTier::Critical => self.critical += 1,
            RiskTier::High => self.high += 1,
            RiskTier::ModerateHigh => self.moderate_high += 1,
            RiskTier::Moderate => self.moderate += 1,
            RiskTier::Low => self.low += 1,
        }
    }

    pub fn count(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::Critical => self.critical,
            RiskTier::High => self.high,
            RiskTier::ModerateHigh => self.moderate_high,
            RiskTier::Moderate => self.moderate,
            RiskTier::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.moderate_high + self.moderate + self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order_matches_rank() {
        let mut tiers = RiskTier::BY_SEVERITY.to_vec();
        tiers.sort();
        let ranks: Vec<u8> = tiers.iter().map(|t| t.severity_rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert!(RiskTier::Critical > RiskTier::High);
        assert!(RiskTier::ModerateHigh > RiskTier::Moderate);
    }

    #[test]
    fn test_color_map() {
        assert_eq!(RiskTier::Critical.color(), "#DC143C");
        assert_eq!(RiskTier::High.color(), "#FF8C00");
        assert_eq!(RiskTier::ModerateHigh.color(), "#FFD700");
        assert_eq!(RiskTier::Moderate.color(), "#90EE90");
        assert_eq!(RiskTier::Low.color(), "#228B22");
    }

    #[test]
    fn test_distribution_counts() {
        let mut d = TierDistribution::default();
        d.add(RiskTier::High);
        d.add(RiskTier::High);
        d.add(RiskTier::Low);
        assert_eq!(d.count(RiskTier::High), 2);
        assert_eq!(d.total(), 3);
    }
}
