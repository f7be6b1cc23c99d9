//! Configuration system for the port-risk engine.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod classification_config;
pub mod dispersion_config;
pub mod matching_config;
pub mod portrisk_config;

pub use analysis_config::{AnalysisConfig, MedianConvention};
pub use classification_config::ClassificationConfig;
pub use dispersion_config::DispersionConfig;
pub use matching_config::MatchingConfig;
pub use portrisk_config::{CliOverrides, PortRiskConfig};
