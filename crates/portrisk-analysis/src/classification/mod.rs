//! Risk classification: ordered threshold rules from ordinal statistics to a tier.

pub mod classifier;
pub mod types;

pub use classifier::RiskClassifier;
pub use types::{tier_distribution, RiskRecord, RiskTier, TierDistribution};
