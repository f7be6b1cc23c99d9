//! Wide-format sheets: one column per variable × period.
//!
//! Variable columns are headed `"<code> <description> [<period label>]"`,
//! e.g. `1.5 Congestionamento portuário [Curto prazo (2026 a 2027)]`.
//! Every other column is respondent metadata.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use portrisk_core::constants::COLUMN_RESPONDENT;
use portrisk_core::errors::IngestError;
use portrisk_core::types::{Dimension, Period, VariableKey};

use super::schema::parse_response;
use super::types::{RawTable, ResponseRow, ResponseTable};

static RE_VARIABLE_HEADER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+)\s+(.+?)\s*\[(.+?)\]\s*$").ok());

/// Parsed variable column header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub code: String,
    pub description: String,
    pub dimension: Dimension,
    pub period: Period,
}

impl ColumnHeader {
    pub fn key(&self) -> VariableKey {
        VariableKey::new(self.dimension, self.code.clone(), self.period)
    }
}

/// Parse a wide-format column header.
///
/// `Ok(None)`: not a variable column (metadata).
/// `Err(UnrecognizedHeader)`: looks like a variable column but its period
/// label or code prefix is unknown.
pub fn parse_column_header(header: &str) -> Result<Option<ColumnHeader>, IngestError> {
    let Some(re) = RE_VARIABLE_HEADER.as_ref() else {
        return Ok(None);
    };
    let Some(caps) = re.captures(header.trim()) else {
        return Ok(None);
    };
    let unrecognized = || IngestError::UnrecognizedHeader {
        header: header.trim().to_string(),
    };

    let code = caps[1].to_string();
    let dimension = Dimension::from_code(&code).ok_or_else(unrecognized)?;
    let period = Period::parse_label(&caps[3]).ok_or_else(unrecognized)?;

    Ok(Some(ColumnHeader {
        description: caps[2].trim().to_string(),
        code,
        dimension,
        period,
    }))
}

impl ResponseTable {
    /// Melt a wide-format sheet into long form.
    ///
    /// Fails only when the sheet has no variable column at all. Unrecognized
    /// headers and malformed cells are collected in `rejected`.
    pub fn from_wide(raw: &RawTable) -> Result<Self, IngestError> {
        let mut table = ResponseTable::default();
        let mut variables: Vec<(usize, ColumnHeader)> = Vec::new();

        for (col, header) in raw.columns.iter().enumerate() {
            match parse_column_header(header) {
                Ok(Some(parsed)) => variables.push((col, parsed)),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(header = %header, "unrecognized variable column");
                    table.rejected.push(e);
                }
            }
        }

        if variables.is_empty() {
            return Err(IngestError::MissingColumn {
                column: "variable columns (\"<code> <description> [<period>]\")".to_string(),
            });
        }

        let respondent_col = raw.column_index(COLUMN_RESPONDENT);
        for idx in 0..raw.len() {
            let row = idx + 1;
            let respondent = respondent_col
                .and_then(|c| raw.cell(idx, c))
                .map(str::to_string)
                .unwrap_or_else(|| row.to_string());

            for (col, header) in &variables {
                match parse_response(raw.cell(idx, *col)) {
                    Ok(response) => {
                        if response.is_none() {
                            table.null_count += 1;
                        }
                        table.rows.push(ResponseRow {
                            row,
                            respondent: Some(respondent.clone()),
                            key: header.key(),
                            description: Some(header.description.clone()),
                            response,
                        });
                    }
                    Err(reason) => table.rejected.push(IngestError::MalformedRow {
                        row,
                        reason: format!("{}: {reason}", header.code),
                    }),
                }
            }
        }

        tracing::info!(
            respondents = raw.len(),
            variable_columns = variables.len(),
            accepted = table.rows.len(),
            rejected = table.rejected.len(),
            nulls = table.null_count,
            "wide sheet melted"
        );
        Ok(table)
    }
}
