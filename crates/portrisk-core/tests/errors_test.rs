//! Tests for the error handling system.

use std::collections::HashSet;

use portrisk_core::errors::error_code::{self, RiskErrorCode};
use portrisk_core::errors::*;

#[test]
fn test_every_error_has_a_code() {
    let errors: Vec<PipelineError> = vec![
        IngestError::MissingColumn { column: "response".into() }.into(),
        IngestError::MalformedRow { row: 3, reason: "bad".into() }.into(),
        IngestError::UnrecognizedHeader { header: "Idade".into() }.into(),
        AnalysisError::EmptyInput { variable: "1.1".into() }.into(),
        AnalysisError::InsufficientData {
            statistic: "correlation".into(),
            required: 2,
            available: 1,
        }
        .into(),
        AnalysisError::UndefinedCorrelation { series: "earlier".into() }.into(),
        MatchError::SamePeriod { period: "long_term".into() }.into(),
        ConfigError::FileNotFound { path: "/tmp".into() }.into(),
    ];
    for e in &errors {
        assert!(!e.error_code().is_empty());
    }
}

#[test]
fn test_taxonomy_codes_are_distinct() {
    let empty = AnalysisError::EmptyInput { variable: "x".into() };
    let insufficient = AnalysisError::InsufficientData {
        statistic: "correlation".into(),
        required: 2,
        available: 0,
    };
    let ambiguous = MatchError::Ambiguous {
        dimension: "social".into(),
        key: "port congestion".into(),
        method: "description".into(),
        earlier_candidates: 2,
        later_candidates: 1,
    };
    let codes: HashSet<&str> = [
        empty.error_code(),
        insufficient.error_code(),
        ambiguous.error_code(),
    ]
    .into_iter()
    .collect();
    assert_eq!(codes.len(), 3);
    assert_eq!(ambiguous.error_code(), error_code::AMBIGUOUS_MATCH);
}

#[test]
fn test_from_conversions_keep_inner_code() {
    let pipeline: PipelineError = AnalysisError::EmptyInput { variable: "2.3".into() }.into();
    assert!(matches!(pipeline, PipelineError::Analysis(AnalysisError::EmptyInput { .. })));
    assert_eq!(pipeline.error_code(), error_code::EMPTY_INPUT);
}

#[test]
fn test_diagnostic_string_format() {
    let e = IngestError::MissingColumn { column: "period".into() };
    assert_eq!(e.diagnostic_string(), "[MISSING_COLUMN] Missing required column: period");
}

#[test]
fn test_only_missing_column_is_fatal() {
    assert!(IngestError::MissingColumn { column: "dimension".into() }.is_fatal());
    assert!(!IngestError::MalformedRow { row: 1, reason: "x".into() }.is_fatal());
}

#[test]
fn test_pipeline_result_collects_errors() {
    let mut result: PipelineResult<Vec<u32>> = PipelineResult::new(vec![1, 2]);
    assert!(result.is_clean());
    result.add_error(AnalysisError::EmptyInput { variable: "1.1".into() });
    result.add_error(AnalysisError::EmptyInput { variable: "1.2".into() });
    result.add_error(MatchError::SamePeriod { period: "immediate".into() });
    assert_eq!(result.error_count(), 3);
    assert_eq!(result.count_code(error_code::EMPTY_INPUT), 2);
    assert_eq!(result.data, vec![1, 2]);
}
