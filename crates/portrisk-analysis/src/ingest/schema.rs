//! Long-format schema validation.

use portrisk_core::constants::{COLUMN_DESCRIPTION, COLUMN_RESPONDENT, REQUIRED_COLUMNS};
use portrisk_core::errors::IngestError;
use portrisk_core::types::{Dimension, LikertResponse, Period, VariableKey};

use super::types::{RawTable, ResponseRow, ResponseTable};

/// Column positions resolved once per table.
struct Columns {
    dimension: usize,
    code: usize,
    period: usize,
    response: usize,
    respondent: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn resolve(raw: &RawTable) -> Result<Self, IngestError> {
        let mut required = [0usize; 4];
        for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = raw
                .column_index(name)
                .ok_or_else(|| IngestError::MissingColumn {
                    column: name.to_string(),
                })?;
        }
        let [dimension, code, period, response] = required;
        Ok(Self {
            dimension,
            code,
            period,
            response,
            respondent: raw.column_index(COLUMN_RESPONDENT),
            description: raw.column_index(COLUMN_DESCRIPTION),
        })
    }
}

impl ResponseTable {
    /// Validate a long-format table: one row per respondent answer.
    ///
    /// Returns `Err` only when a required column is missing. Row-level
    /// problems are collected in `rejected` and the row is skipped.
    pub fn from_raw(raw: &RawTable) -> Result<Self, IngestError> {
        let cols = Columns::resolve(raw)?;
        let mut table = ResponseTable::default();

        for idx in 0..raw.len() {
            let row = idx + 1;
            match validate_row(raw, idx, &cols) {
                Ok(parsed) => {
                    if parsed.response.is_none() {
                        table.null_count += 1;
                    }
                    table.rows.push(parsed);
                }
                Err(reason) => {
                    tracing::debug!(row, %reason, "rejecting malformed row");
                    table.rejected.push(IngestError::MalformedRow { row, reason });
                }
            }
        }

        tracing::info!(
            accepted = table.rows.len(),
            rejected = table.rejected.len(),
            nulls = table.null_count,
            "response table validated"
        );
        Ok(table)
    }
}

fn validate_row(raw: &RawTable, idx: usize, cols: &Columns) -> Result<ResponseRow, String> {
    let code = raw
        .cell(idx, cols.code)
        .ok_or_else(|| "missing variable code".to_string())?;
    let dimension = resolve_dimension(raw.cell(idx, cols.dimension), code)?;

    let period_label = raw
        .cell(idx, cols.period)
        .ok_or_else(|| "missing period".to_string())?;
    let period = Period::parse_label(period_label)
        .ok_or_else(|| format!("unknown period '{period_label}'"))?;

    let response = parse_response(raw.cell(idx, cols.response))?;

    Ok(ResponseRow {
        row: idx + 1,
        respondent: cols
            .respondent
            .and_then(|c| raw.cell(idx, c))
            .map(str::to_string),
        key: VariableKey::new(dimension, code, period),
        description: cols
            .description
            .and_then(|c| raw.cell(idx, c))
            .map(str::to_string),
        response,
    })
}

/// Explicit dimension label wins but must agree with the code prefix when
/// the code has one; a blank label is inferred from the prefix.
pub(crate) fn resolve_dimension(label: Option<&str>, code: &str) -> Result<Dimension, String> {
    let from_code = Dimension::from_code(code);
    match label {
        Some(label) => {
            let parsed = Dimension::parse_label(label)
                .ok_or_else(|| format!("unknown dimension '{label}'"))?;
            match from_code {
                Some(prefixed) if prefixed != parsed => Err(format!(
                    "dimension '{parsed}' contradicts code prefix of '{code}' ({prefixed})"
                )),
                _ => Ok(parsed),
            }
        }
        None => from_code.ok_or_else(|| format!("cannot infer dimension from code '{code}'")),
    }
}

/// Parse a response cell. Blank, `NaN`, `null` and `none` are null answers;
/// integral values in 1..=5 (`"4"`, `"4.0"`) are accepted; anything else is
/// an error.
pub fn parse_response(cell: Option<&str>) -> Result<Option<LikertResponse>, String> {
    let Some(text) = cell.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if ["nan", "null", "none"]
        .iter()
        .any(|n| text.eq_ignore_ascii_case(n))
    {
        return Ok(None);
    }
    let value: f64 = text
        .parse()
        .map_err(|_| format!("response '{text}' is not numeric"))?;
    LikertResponse::from_f64(value)
        .map(Some)
        .ok_or_else(|| format!("response '{text}' is not an integer in 1..=5"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_forms() {
        assert_eq!(parse_response(Some("4")).unwrap().map(|r| r.value()), Some(4));
        assert_eq!(parse_response(Some(" 4.0 ")).unwrap().map(|r| r.value()), Some(4));
        assert_eq!(parse_response(Some("NaN")).unwrap(), None);
        assert_eq!(parse_response(Some("null")).unwrap(), None);
        assert_eq!(parse_response(None).unwrap(), None);
        assert!(parse_response(Some("4.5")).is_err());
        assert!(parse_response(Some("6")).is_err());
        assert!(parse_response(Some("high")).is_err());
    }

    #[test]
    fn test_resolve_dimension() {
        assert_eq!(resolve_dimension(None, "2.3"), Ok(Dimension::Environmental));
        assert_eq!(
            resolve_dimension(Some("Geopolítica"), "3.1"),
            Ok(Dimension::Geopolitical)
        );
        assert!(resolve_dimension(Some("Social"), "1.1").is_err());
        assert!(resolve_dimension(None, "X1").is_err());
        assert_eq!(resolve_dimension(Some("social"), "X1"), Ok(Dimension::Social));
    }
}
