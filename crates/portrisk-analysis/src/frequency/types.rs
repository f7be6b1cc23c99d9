//! Core types for ordinal frequency analysis.

use serde::{Deserialize, Serialize};

use portrisk_core::types::{LikertResponse, VariableKey};

/// Valid responses for one (variable, period). Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    key: VariableKey,
    description: Option<String>,
    responses: Vec<LikertResponse>,
}

impl ResponseSet {
    pub fn new(key: VariableKey, description: Option<String>, responses: Vec<LikertResponse>) -> Self {
        Self {
            key,
            description,
            responses,
        }
    }

    /// Build from raw integers, dropping anything outside 1..=5.
    pub fn from_values(key: VariableKey, values: &[u8]) -> Self {
        let responses = values.iter().filter_map(|&v| LikertResponse::new(v)).collect();
        Self::new(key, None, responses)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn key(&self) -> &VariableKey {
        &self.key
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn responses(&self) -> &[LikertResponse] {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// Count and share of one Likert category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFrequency {
    /// Category value, 1..=5.
    pub category: u8,
    pub count: usize,
    /// Percentage of valid responses, rounded to 2 decimals.
    pub percentage: f64,
}

/// Ordinal statistics for one response set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableStats {
    /// Number of valid responses.
    pub sample_size: usize,
    /// Ordinal median (see `MedianConvention`).
    pub median: f64,
    /// Most frequent category; ties go to the lowest.
    pub mode: u8,
    /// Nearest-rank 25th percentile.
    pub percentile_25: u8,
    /// Nearest-rank 75th percentile.
    pub percentile_75: u8,
    /// `percentile_75 - percentile_25`.
    pub iqr: f64,
    /// One entry per category 1..=5, zero counts included.
    pub frequencies: Vec<CategoryFrequency>,
    /// Unrounded percentage of responses in {4, 5}.
    pub high_share: f64,
    /// Unrounded percentage of responses in {1, 2}.
    pub low_share: f64,
    /// The modal category holds more than the configured share of responses.
    pub high_consensus: bool,
}

impl VariableStats {
    pub fn count_of(&self, category: u8) -> usize {
        self.frequencies
            .iter()
            .find(|f| f.category == category)
            .map(|f| f.count)
            .unwrap_or(0)
    }

    pub fn percentage_of(&self, category: u8) -> f64 {
        self.frequencies
            .iter()
            .find(|f| f.category == category)
            .map(|f| f.percentage)
            .unwrap_or(0.0)
    }

    /// Sum of the rounded category percentages. 100 within rounding.
    pub fn percentage_total(&self) -> f64 {
        self.frequencies.iter().map(|f| f.percentage).sum()
    }
}
