//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    AnalysisConfig, ClassificationConfig, DispersionConfig, MatchingConfig, MedianConvention,
};
use crate::errors::ConfigError;
use crate::types::Period;

/// Project config file name, looked up in the analysis root.
pub const PROJECT_CONFIG_FILE: &str = "portrisk.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PORTRISK_*`)
/// 3. Project config (`portrisk.toml` in the analysis root)
/// 4. User config (`~/.portrisk/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PortRiskConfig {
    pub analysis: AnalysisConfig,
    pub classification: ClassificationConfig,
    pub matching: MatchingConfig,
    pub dispersion: DispersionConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub median_convention: Option<MedianConvention>,
    pub parallel: Option<bool>,
    pub earlier_period: Option<Period>,
    pub later_period: Option<Period>,
    pub neutral_threshold: Option<f64>,
}

impl PortRiskConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &PortRiskConfig) -> Result<(), ConfigError> {
        if let Some(share) = config.analysis.high_consensus_share {
            check_percent("analysis.high_consensus_share", share)?;
        }

        let c = &config.classification;
        for (field, value) in [
            ("classification.critical_median", c.critical_median),
            ("classification.high_median", c.high_median),
            ("classification.moderate_high_median", c.moderate_high_median),
            ("classification.moderate_median", c.moderate_median),
        ] {
            if let Some(v) = value {
                check_scale(field, v)?;
            }
        }
        for (field, value) in [
            ("classification.critical_high_share", c.critical_high_share),
            ("classification.high_high_share", c.high_high_share),
            ("classification.moderate_high_high_share", c.moderate_high_high_share),
        ] {
            if let Some(v) = value {
                check_percent(field, v)?;
            }
        }
        if c.median_ladder().windows(2).any(|w| w[0] < w[1]) {
            return Err(ConfigError::ValidationFailed {
                field: "classification".to_string(),
                message: "median thresholds must not increase from critical to moderate"
                    .to_string(),
            });
        }

        let m = &config.matching;
        if m.effective_earlier_period() == m.effective_later_period() {
            return Err(ConfigError::ValidationFailed {
                field: "matching.later_period".to_string(),
                message: "must differ from matching.earlier_period".to_string(),
            });
        }

        let d = &config.dispersion;
        check_scale("dispersion.neutral_threshold", d.effective_neutral_threshold())?;
        let (slight, moderate, significant) = (
            d.effective_slight_band(),
            d.effective_moderate_band(),
            d.effective_significant_band(),
        );
        if !(0.0 <= slight && slight <= moderate && moderate <= significant) {
            return Err(ConfigError::ValidationFailed {
                field: "dispersion".to_string(),
                message: "bands must satisfy 0 <= slight <= moderate <= significant".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the user config path: `~/.portrisk/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        home_dir().map(|h| h.join(".portrisk").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut PortRiskConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PortRiskConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a `Some` value.
    fn merge(base: &mut PortRiskConfig, other: &PortRiskConfig) {
        // Analysis
        merge_opt(&mut base.analysis.median_convention, other.analysis.median_convention);
        merge_opt(&mut base.analysis.parallel, other.analysis.parallel);
        merge_opt(
            &mut base.analysis.high_consensus_share,
            other.analysis.high_consensus_share,
        );

        // Classification
        let (b, o) = (&mut base.classification, &other.classification);
        merge_opt(&mut b.critical_median, o.critical_median);
        merge_opt(&mut b.critical_high_share, o.critical_high_share);
        merge_opt(&mut b.high_median, o.high_median);
        merge_opt(&mut b.high_high_share, o.high_high_share);
        merge_opt(&mut b.moderate_high_median, o.moderate_high_median);
        merge_opt(&mut b.moderate_high_high_share, o.moderate_high_high_share);
        merge_opt(&mut b.moderate_median, o.moderate_median);

        // Matching
        merge_opt(&mut base.matching.earlier_period, other.matching.earlier_period);
        merge_opt(&mut base.matching.later_period, other.matching.later_period);
        merge_opt(
            &mut base.matching.description_fallback,
            other.matching.description_fallback,
        );

        // Dispersion
        let (b, o) = (&mut base.dispersion, &other.dispersion);
        merge_opt(&mut b.neutral_threshold, o.neutral_threshold);
        merge_opt(&mut b.significant_band, o.significant_band);
        merge_opt(&mut b.moderate_band, o.moderate_band);
        merge_opt(&mut b.slight_band, o.slight_band);
        merge_opt(&mut b.labels_per_quadrant, o.labels_per_quadrant);
        merge_opt(&mut b.label_limit, o.label_limit);
    }

    /// Apply environment variable overrides.
    /// Pattern: `PORTRISK_MEDIAN_CONVENTION`, `PORTRISK_NEUTRAL_THRESHOLD`, etc.
    fn apply_env_overrides(config: &mut PortRiskConfig) {
        if let Ok(val) = std::env::var("PORTRISK_MEDIAN_CONVENTION") {
            if let Some(v) = MedianConvention::parse(&val) {
                config.analysis.median_convention = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PORTRISK_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PORTRISK_EARLIER_PERIOD") {
            if let Some(v) = Period::parse_label(&val) {
                config.matching.earlier_period = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PORTRISK_LATER_PERIOD") {
            if let Some(v) = Period::parse_label(&val) {
                config.matching.later_period = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PORTRISK_NEUTRAL_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.dispersion.neutral_threshold = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PortRiskConfig, cli: &CliOverrides) {
        merge_opt(&mut config.analysis.median_convention, cli.median_convention);
        merge_opt(&mut config.analysis.parallel, cli.parallel);
        merge_opt(&mut config.matching.earlier_period, cli.earlier_period);
        merge_opt(&mut config.matching.later_period, cli.later_period);
        merge_opt(&mut config.dispersion.neutral_threshold, cli.neutral_threshold);
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn merge_opt<T: Copy>(base: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *base = other;
    }
}

fn check_percent(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be between 0 and 100".to_string(),
        });
    }
    Ok(())
}

fn check_scale(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(1.0..=5.0).contains(&value) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be between 1.0 and 5.0".to_string(),
        });
    }
    Ok(())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
