//! Assessment horizons.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::label::fold_label;

/// Time window over which a variable is assessed.
/// Ordered chronologically: `Immediate < ShortTerm < LongTerm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Immediate (2025).
    Immediate,
    /// Short term (2026 to 2027).
    ShortTerm,
    /// Long term (up to 2035).
    LongTerm,
}

/// Questionnaire label fragments per period, matched as folded prefixes.
const IMMEDIATE_ALIASES: &[&str] = &["immediate", "imediato (2025)", "imediato", "2025"];
const SHORT_TERM_ALIASES: &[&str] = &[
    "short_term",
    "short term",
    "curto prazo (2026 a 2027)",
    "curto prazo (2026 a",
    "curto prazo",
    "2026-2027",
];
const LONG_TERM_ALIASES: &[&str] = &[
    "long_term",
    "long term",
    "longo prazo (ate 2035)",
    "longo prazo (ate 203",
    "longo prazo",
    "2035",
];

impl Period {
    pub const ALL: [Period; 3] = [Self::Immediate, Self::ShortTerm, Self::LongTerm];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::ShortTerm => "short_term",
            Self::LongTerm => "long_term",
        }
    }

    /// Parse a period label: enum names or the questionnaire's labels,
    /// including the truncated forms found in exported column headers.
    pub fn parse_label(label: &str) -> Option<Self> {
        let folded = fold_label(label);
        if folded.is_empty() {
            return None;
        }
        let matches = |aliases: &[&str]| aliases.iter().any(|a| folded == *a || folded.starts_with(a));
        if matches(SHORT_TERM_ALIASES) {
            Some(Self::ShortTerm)
        } else if matches(LONG_TERM_ALIASES) {
            Some(Self::LongTerm)
        } else if matches(IMMEDIATE_ALIASES) {
            Some(Self::Immediate)
        } else {
            None
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s).ok_or_else(|| format!("unknown period '{s}'"))
    }
}
