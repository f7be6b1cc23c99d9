//! Frequency Analyzer: ordinal median, lowest-value mode, nearest-rank percentiles.

use portrisk_analysis::frequency::{FrequencyAnalyzer, ResponseSet};
use portrisk_core::config::MedianConvention;
use portrisk_core::errors::{AnalysisError, RiskErrorCode};
use portrisk_core::types::{Dimension, Period, VariableKey};

fn set(values: &[u8]) -> ResponseSet {
    ResponseSet::from_values(
        VariableKey::new(Dimension::Economic, "1.1", Period::ShortTerm),
        values,
    )
}

#[test]
fn test_scenario_critical_distribution() {
    let stats = FrequencyAnalyzer::default()
        .analyze(&set(&[4, 4, 4, 5, 3, 4, 5, 3, 4, 2]))
        .unwrap();
    assert_eq!(stats.sample_size, 10);
    assert_eq!(stats.median, 4.0);
    assert_eq!(stats.mode, 4);
    assert_eq!(stats.percentile_25, 3);
    assert_eq!(stats.percentile_75, 4);
    assert_eq!(stats.iqr, 1.0);
    assert!((stats.high_share - 70.0).abs() < 1e-9);
    assert!((stats.low_share - 10.0).abs() < 1e-9);
    assert_eq!(stats.count_of(1), 0);
    assert_eq!(stats.count_of(4), 5);
    assert_eq!(stats.percentage_of(4), 50.0);
    assert!(!stats.high_consensus);
}

#[test]
fn test_scenario_moderate_distribution() {
    let stats = FrequencyAnalyzer::default()
        .analyze(&set(&[2, 2, 3, 2, 3, 2, 1, 2]))
        .unwrap();
    assert_eq!(stats.median, 2.0);
    assert_eq!(stats.mode, 2);
    assert_eq!(stats.percentile_25, 2);
    assert_eq!(stats.percentile_75, 2);
    assert_eq!(stats.iqr, 0.0);
    assert_eq!(stats.percentage_of(2), 62.5);
}

#[test]
fn test_even_count_takes_lower_central_value() {
    let analyzer = FrequencyAnalyzer::default();
    let stats = analyzer.analyze(&set(&[2, 3])).unwrap();
    assert_eq!(stats.median, 2.0);

    let stats = analyzer.analyze(&set(&[1, 2, 4, 5])).unwrap();
    assert_eq!(stats.median, 2.0);
}

#[test]
fn test_interpolated_convention() {
    let analyzer = FrequencyAnalyzer::new(MedianConvention::Interpolated, 70.0);
    assert_eq!(analyzer.convention(), MedianConvention::Interpolated);
    assert_eq!(analyzer.analyze(&set(&[2, 3])).unwrap().median, 2.5);
    assert_eq!(analyzer.analyze(&set(&[1, 2, 4, 5])).unwrap().median, 3.0);
    // Odd counts agree with the lower convention.
    assert_eq!(analyzer.analyze(&set(&[1, 3, 5])).unwrap().median, 3.0);
}

#[test]
fn test_mode_tie_prefers_lowest_category() {
    let stats = FrequencyAnalyzer::default().analyze(&set(&[5, 1, 5, 1])).unwrap();
    assert_eq!(stats.mode, 1);

    let stats = FrequencyAnalyzer::default().analyze(&set(&[3, 4, 4, 3, 5])).unwrap();
    assert_eq!(stats.mode, 3);
}

#[test]
fn test_frequencies_cover_all_categories() {
    let stats = FrequencyAnalyzer::default().analyze(&set(&[3])).unwrap();
    let categories: Vec<u8> = stats.frequencies.iter().map(|f| f.category).collect();
    assert_eq!(categories, vec![1, 2, 3, 4, 5]);
    assert_eq!(stats.percentage_of(3), 100.0);
    assert_eq!(stats.percentile_25, 3);
    assert_eq!(stats.percentile_75, 3);
}

#[test]
fn test_percentages_rounded_to_two_decimals() {
    let stats = FrequencyAnalyzer::default().analyze(&set(&[1, 2, 3])).unwrap();
    assert_eq!(stats.percentage_of(1), 33.33);
    assert!((stats.percentage_total() - 100.0).abs() <= 0.1);
}

#[test]
fn test_high_consensus_flag() {
    let analyzer = FrequencyAnalyzer::default();
    let stats = analyzer.analyze(&set(&[5, 5, 5, 5, 5, 5, 5, 5, 1, 1])).unwrap();
    assert!(stats.high_consensus);

    // Exactly 70% is not above the threshold.
    let stats = analyzer.analyze(&set(&[5, 5, 5, 5, 5, 5, 5, 1, 1, 1])).unwrap();
    assert!(!stats.high_consensus);
}

#[test]
fn test_empty_set_is_empty_input() {
    let err = FrequencyAnalyzer::default().analyze(&set(&[])).unwrap_err();
    assert_eq!(err.error_code(), "EMPTY_INPUT");
    match err {
        AnalysisError::EmptyInput { variable } => {
            assert_eq!(variable, "economic:1.1@short_term");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_out_of_range_values_dropped_by_constructor() {
    let s = set(&[0, 6, 3, 7]);
    assert_eq!(s.len(), 1);
    let stats = FrequencyAnalyzer::default().analyze(&s).unwrap();
    assert_eq!(stats.sample_size, 1);
}
