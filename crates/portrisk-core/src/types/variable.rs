//! Identity of one variable within one dimension and one period.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Dimension, Period};

/// `(dimension, code, period)`: the key every per-variable record is tagged with.
/// Ordering is dimension, then code (numeric-aware), then period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableKey {
    pub dimension: Dimension,
    pub code: String,
    pub period: Period,
}

impl VariableKey {
    pub fn new(dimension: Dimension, code: impl Into<String>, period: Period) -> Self {
        Self {
            dimension,
            code: code.into(),
            period,
        }
    }
}

impl Ord for VariableKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.dimension
            .cmp(&other.dimension)
            .then_with(|| compare_codes(&self.code, &other.code))
            .then_with(|| self.period.cmp(&other.period))
    }
}

impl PartialOrd for VariableKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.dimension, self.code, self.period)
    }
}

/// Compare dotted codes segment by segment so that `1.2 < 1.10`.
/// Non-numeric segments fall back to lexical order; numerically equal
/// codes (`1.02` vs `1.2`) are tie-broken lexically to stay consistent with `Eq`.
pub fn compare_codes(a: &str, b: &str) -> std::cmp::Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return std::cmp::Ordering::Less,
            (Some(_), None) => return std::cmp::Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(nx), Ok(ny)) => nx.cmp(&ny),
                    _ => x.cmp(y),
                };
                if ord != std::cmp::Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_code_order() {
        assert_eq!(compare_codes("1.2", "1.10"), std::cmp::Ordering::Less);
        assert_eq!(compare_codes("1.10", "1.10"), std::cmp::Ordering::Equal);
        assert_eq!(compare_codes("2.1", "1.9"), std::cmp::Ordering::Greater);
    }

    #[test]
    fn test_key_order() {
        let a = VariableKey::new(Dimension::Economic, "1.2", Period::LongTerm);
        let b = VariableKey::new(Dimension::Economic, "1.10", Period::ShortTerm);
        let c = VariableKey::new(Dimension::Economic, "1.2", Period::ShortTerm);
        let mut keys = vec![b.clone(), a.clone(), c.clone()];
        keys.sort();
        assert_eq!(keys, vec![c, a, b]);
    }
}
