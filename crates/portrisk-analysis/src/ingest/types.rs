//! Raw and validated table types.

use serde::{Deserialize, Serialize};

use portrisk_core::errors::IngestError;
use portrisk_core::types::{BTreeMap, LikertResponse, VariableKey};

use crate::frequency::ResponseSet;

/// Untyped table as handed over by the external loader: named columns and
/// rows of optional string cells. Short rows are padded with `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Empty strings are stored as `None`.
    pub fn push_row<S: AsRef<str>>(&mut self, cells: impl IntoIterator<Item = Option<S>>) {
        let row = cells
            .into_iter()
            .map(|c| {
                c.map(|s| s.as_ref().to_string())
                    .filter(|s| !s.trim().is_empty())
            })
            .collect();
        self.rows.push(row);
    }

    /// Index of a column, matched case-insensitively after trimming.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.trim().eq_ignore_ascii_case(name))
    }

    /// Cell at `(row, col)`, trimmed; `None` for blanks and short rows.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)?
            .get(col)?
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One validated respondent answer. `response` is `None` for a null answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRow {
    /// 1-based data row number in the source table.
    pub row: usize,
    pub respondent: Option<String>,
    pub key: VariableKey,
    pub description: Option<String>,
    pub response: Option<LikertResponse>,
}

/// Schema-validated response table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseTable {
    pub rows: Vec<ResponseRow>,
    /// Rows rejected during validation. Never fatal.
    pub rejected: Vec<IngestError>,
    /// Accepted rows whose response was null.
    pub null_count: usize,
}

impl ResponseTable {
    /// Build directly from already-typed rows.
    pub fn from_rows(rows: Vec<ResponseRow>) -> Self {
        let null_count = rows.iter().filter(|r| r.response.is_none()).count();
        Self {
            rows,
            rejected: Vec::new(),
            null_count,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Accepted rows with a non-null response.
    pub fn valid_count(&self) -> usize {
        self.rows.len() - self.null_count
    }

    /// One `ResponseSet` per `VariableKey`, sorted by key. Variables whose
    /// every answer was null still get an (empty) set so they can be flagged
    /// downstream. The first non-empty description wins.
    pub fn response_sets(&self) -> Vec<ResponseSet> {
        let mut groups: BTreeMap<&VariableKey, (Option<&str>, Vec<LikertResponse>)> =
            BTreeMap::new();
        for row in &self.rows {
            let entry = groups.entry(&row.key).or_default();
            if entry.0.is_none() {
                entry.0 = row.description.as_deref();
            }
            if let Some(r) = row.response {
                entry.1.push(r);
            }
        }
        groups
            .into_iter()
            .map(|(key, (description, responses))| {
                ResponseSet::new(key.clone(), description.map(str::to_string), responses)
            })
            .collect()
    }
}
