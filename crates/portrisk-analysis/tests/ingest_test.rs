//! Schema validation at the ingestion boundary.

use portrisk_analysis::ingest::{RawTable, ResponseTable};
use portrisk_core::errors::{IngestError, RiskErrorCode};
use portrisk_core::types::{Dimension, Period, VariableKey};

fn long_table(rows: &[[&str; 5]]) -> RawTable {
    let mut raw = RawTable::new(["respondent", "dimension", "variable_code", "period", "response"]);
    for r in rows {
        raw.push_row(r.iter().map(|c| Some(*c)));
    }
    raw
}

#[test]
fn test_valid_rows_accepted() {
    let raw = long_table(&[
        ["r1", "Economic", "1.1", "short_term", "4"],
        ["r2", "Econômica", "1.1", "Curto prazo (2026 a 2027)", "5.0"],
        ["r1", "", "2.3", "Longo prazo (até 2035)", "2"],
    ]);
    let table = ResponseTable::from_raw(&raw).unwrap();
    assert_eq!(table.len(), 3);
    assert!(table.rejected.is_empty());
    assert_eq!(table.null_count, 0);

    let third = &table.rows[2];
    assert_eq!(third.key.dimension, Dimension::Environmental);
    assert_eq!(third.key.period, Period::LongTerm);
    assert_eq!(third.respondent.as_deref(), Some("r1"));
    assert_eq!(third.row, 3);
}

#[test]
fn test_missing_required_column_is_fatal() {
    let mut raw = RawTable::new(["dimension", "variable_code", "response"]);
    raw.push_row([Some("Economic"), Some("1.1"), Some("3")]);
    let err = ResponseTable::from_raw(&raw).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.error_code(), "MISSING_COLUMN");
    assert_eq!(
        err,
        IngestError::MissingColumn {
            column: "period".to_string()
        }
    );
}

#[test]
fn test_column_names_case_insensitive() {
    let mut raw = RawTable::new([" Dimension", "VARIABLE_CODE", "Period ", "Response"]);
    raw.push_row([Some("Social"), Some("4.1"), Some("2025"), Some("3")]);
    let table = ResponseTable::from_raw(&raw).unwrap();
    assert_eq!(table.rows[0].key.period, Period::Immediate);
}

#[test]
fn test_malformed_rows_collected_not_fatal() {
    let raw = long_table(&[
        ["r1", "Economic", "1.1", "short_term", "4.5"],
        ["r2", "Economic", "1.1", "short_term", "7"],
        ["r3", "Economic", "1.1", "next decade", "3"],
        ["r4", "Social", "1.1", "short_term", "3"],
        ["r5", "Economic", "", "short_term", "3"],
        ["r6", "Economic", "1.1", "short_term", "3"],
    ]);
    let table = ResponseTable::from_raw(&raw).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rejected.len(), 5);
    assert!(table.rejected.iter().all(|e| !e.is_fatal()));
    assert!(table
        .rejected
        .iter()
        .all(|e| e.error_code() == "MALFORMED_ROW"));
    match &table.rejected[3] {
        IngestError::MalformedRow { row, reason } => {
            assert_eq!(*row, 4);
            assert!(reason.contains("contradicts"), "reason: {reason}");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_null_responses_counted_and_variable_registered() {
    let raw = long_table(&[
        ["r1", "Geopolitical", "3.4", "immediate", "NaN"],
        ["r2", "Geopolitical", "3.4", "immediate", ""],
        ["r1", "Geopolitical", "3.5", "immediate", "4"],
    ]);
    let table = ResponseTable::from_raw(&raw).unwrap();
    assert_eq!(table.null_count, 2);
    assert_eq!(table.valid_count(), 1);

    let sets = table.response_sets();
    assert_eq!(sets.len(), 2);
    assert_eq!(
        sets[0].key(),
        &VariableKey::new(Dimension::Geopolitical, "3.4", Period::Immediate)
    );
    assert!(sets[0].is_empty());
    assert_eq!(sets[1].len(), 1);
}

#[test]
fn test_response_sets_sorted_and_grouped() {
    let mut raw = RawTable::new(["dimension", "variable_code", "period", "response", "description"]);
    for (code, period, value, desc) in [
        ("1.10", "long_term", "3", None),
        ("1.2", "short_term", "4", Some("Port congestion")),
        ("1.2", "short_term", "5", Some("Port congestion (alt)")),
        ("1.2", "long_term", "2", None),
    ] {
        raw.push_row([Some("Economic"), Some(code), Some(period), Some(value), desc]);
    }
    let table = ResponseTable::from_raw(&raw).unwrap();
    let sets = table.response_sets();
    let keys: Vec<String> = sets.iter().map(|s| s.key().to_string()).collect();
    assert_eq!(
        keys,
        vec![
            "economic:1.2@short_term",
            "economic:1.2@long_term",
            "economic:1.10@long_term",
        ]
    );
    assert_eq!(sets[0].len(), 2);
    assert_eq!(sets[0].description(), Some("Port congestion"));
    assert_eq!(sets[1].description(), None);
}

#[test]
fn test_wide_sheet_melted() {
    let mut raw = RawTable::new([
        "Carimbo de data/hora",
        "1.5 Congestionamento portuário [Curto prazo (2026 a 2027)]",
        "1.5 Congestionamento portuário [Longo prazo (até 203]",
        "2.1 Enchentes [Próxima década]",
    ]);
    raw.push_row([Some("2025-03-01"), Some("3"), Some("4"), Some("2")]);
    raw.push_row([Some("2025-03-02"), Some("nan"), Some("5"), Some("2")]);
    raw.push_row([Some("2025-03-03"), Some("9"), Some("4"), Some("2")]);

    let table = ResponseTable::from_wide(&raw).unwrap();
    // Two variable columns × three respondents, one cell rejected.
    assert_eq!(table.len(), 5);
    assert_eq!(table.null_count, 1);
    assert_eq!(table.rejected.len(), 2);
    assert!(matches!(table.rejected[0], IngestError::UnrecognizedHeader { .. }));
    assert!(matches!(table.rejected[1], IngestError::MalformedRow { row: 3, .. }));

    let sets = table.response_sets();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].key().period, Period::ShortTerm);
    assert_eq!(sets[0].len(), 1);
    assert_eq!(sets[1].key().period, Period::LongTerm);
    assert_eq!(sets[1].len(), 3);
    assert_eq!(sets[1].description(), Some("Congestionamento portuário"));
    assert_eq!(table.rows[0].respondent.as_deref(), Some("1"));
}

#[test]
fn test_wide_sheet_without_variable_columns() {
    let raw = RawTable::new(["Nome", "Estado (UF)"]);
    let err = ResponseTable::from_wide(&raw).unwrap_err();
    assert!(err.is_fatal());
}
