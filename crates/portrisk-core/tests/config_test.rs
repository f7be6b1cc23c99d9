//! Tests for the configuration system.

use std::sync::Mutex;

use portrisk_core::config::{CliOverrides, MedianConvention, PortRiskConfig};
use portrisk_core::errors::ConfigError;
use portrisk_core::types::Period;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all PORTRISK_ env vars to prevent cross-test contamination.
fn clear_env_vars() {
    for key in [
        "PORTRISK_MEDIAN_CONVENTION",
        "PORTRISK_PARALLEL",
        "PORTRISK_EARLIER_PERIOD",
        "PORTRISK_LATER_PERIOD",
        "PORTRISK_NEUTRAL_THRESHOLD",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("portrisk.toml"),
        r#"
[analysis]
median_convention = "interpolated"
parallel = true

[dispersion]
neutral_threshold = 2.5
"#,
    )
    .unwrap();

    std::env::set_var("PORTRISK_NEUTRAL_THRESHOLD", "3.5");

    let cli = CliOverrides {
        parallel: Some(false),
        ..Default::default()
    };

    let config = PortRiskConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI beats project for `parallel`
    assert_eq!(config.analysis.parallel, Some(false));
    // Env beats project for the neutral threshold
    assert_eq!(config.dispersion.neutral_threshold, Some(3.5));
    // Project value survives where nothing overrides it
    assert_eq!(
        config.analysis.effective_median_convention(),
        MedianConvention::Interpolated
    );

    clear_env_vars();
}

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let config = PortRiskConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.analysis.effective_median_convention(), MedianConvention::Lower);
    assert!(config.analysis.effective_parallel());
    assert_eq!(config.classification.effective_critical_median(), 4.0);
    assert_eq!(config.classification.effective_critical_high_share(), 50.0);
    assert_eq!(config.matching.effective_earlier_period(), Period::ShortTerm);
    assert_eq!(config.matching.effective_later_period(), Period::LongTerm);
    assert_eq!(config.dispersion.effective_neutral_threshold(), 3.0);
    assert_eq!(config.dispersion.effective_label_limit(), 30);
}

#[test]
fn test_env_period_override_accepts_questionnaire_label() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::env::set_var("PORTRISK_EARLIER_PERIOD", "Imediato (2025)");
    let config = PortRiskConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.matching.effective_earlier_period(), Period::Immediate);

    clear_env_vars();
}

#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("portrisk.toml"), "this is not valid toml {{{{").unwrap();

    match PortRiskConfig::load(dir.path(), None) {
        Err(ConfigError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn test_share_out_of_range_rejected() {
    let result = PortRiskConfig::from_toml(
        r#"
[classification]
critical_high_share = 150.0
"#,
    );
    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "classification.critical_high_share");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn test_inverted_median_ladder_rejected() {
    let result = PortRiskConfig::from_toml(
        r#"
[classification]
high_median = 4.5
"#,
    );
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_same_periods_rejected() {
    let result = PortRiskConfig::from_toml(
        r#"
[matching]
earlier_period = "long_term"
"#,
    );
    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "matching.later_period");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn test_unordered_bands_rejected() {
    let result = PortRiskConfig::from_toml(
        r#"
[dispersion]
moderate_band = 0.8
"#,
    );
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_toml_round_trip_preserves_overrides() {
    let config = PortRiskConfig::from_toml(
        r#"
[analysis]
median_convention = "interpolated"

[matching]
earlier_period = "immediate"
later_period = "short_term"
"#,
    )
    .unwrap();

    let serialized = config.to_toml().unwrap();
    let reparsed = PortRiskConfig::from_toml(&serialized).unwrap();
    assert_eq!(
        reparsed.analysis.effective_median_convention(),
        MedianConvention::Interpolated
    );
    assert_eq!(reparsed.matching.effective_earlier_period(), Period::Immediate);
    assert_eq!(reparsed.matching.effective_later_period(), Period::ShortTerm);
}

#[test]
fn test_unknown_keys_ignored() {
    let config = PortRiskConfig::from_toml(
        r#"
[analysis]
future_option = "whatever"

[rendering]
palette = "husl"
"#,
    )
    .unwrap();
    assert!(config.analysis.effective_parallel());
}
