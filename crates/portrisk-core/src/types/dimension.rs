//! The five thematic risk dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::label::fold_label;

/// Thematic risk category. Variable codes are prefixed with the
/// dimension's ordinal (`1.` Economic through `5.` Technological).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Economic,
    Environmental,
    Geopolitical,
    Social,
    Technological,
}

impl Dimension {
    /// All dimensions in code-prefix order.
    pub const ALL: [Dimension; 5] = [
        Self::Economic,
        Self::Environmental,
        Self::Geopolitical,
        Self::Social,
        Self::Technological,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Economic => "economic",
            Self::Environmental => "environmental",
            Self::Geopolitical => "geopolitical",
            Self::Social => "social",
            Self::Technological => "technological",
        }
    }

    /// Numeric prefix used by variable codes of this dimension.
    pub fn code_prefix(&self) -> u8 {
        match self {
            Self::Economic => 1,
            Self::Environmental => 2,
            Self::Geopolitical => 3,
            Self::Social => 4,
            Self::Technological => 5,
        }
    }

    /// Infer the dimension from a variable code such as `"1.5"` or `"3.12 ..."`.
    pub fn from_code(code: &str) -> Option<Self> {
        let head = code.trim().split('.').next()?;
        match head.parse::<u8>().ok()? {
            1 => Some(Self::Economic),
            2 => Some(Self::Environmental),
            3 => Some(Self::Geopolitical),
            4 => Some(Self::Social),
            5 => Some(Self::Technological),
            _ => None,
        }
    }

    /// Parse a dimension label. Accepts English names and the questionnaire's
    /// Portuguese names, with or without accents.
    pub fn parse_label(label: &str) -> Option<Self> {
        match fold_label(label).as_str() {
            "economic" | "economica" | "economico" => Some(Self::Economic),
            "environmental" | "ambiental" => Some(Self::Environmental),
            "geopolitical" | "geopolitica" | "geopolitico" => Some(Self::Geopolitical),
            "social" => Some(Self::Social),
            "technological" | "tecnologica" | "tecnologico" => Some(Self::Technological),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s).ok_or_else(|| format!("unknown dimension '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_prefix() {
        assert_eq!(Dimension::from_code("1.5"), Some(Dimension::Economic));
        assert_eq!(Dimension::from_code("5.10"), Some(Dimension::Technological));
        assert_eq!(Dimension::from_code("9.1"), None);
        assert_eq!(Dimension::from_code("abc"), None);
    }

    #[test]
    fn test_parse_portuguese_labels() {
        assert_eq!(Dimension::parse_label("Geopolítica"), Some(Dimension::Geopolitical));
        assert_eq!(Dimension::parse_label("TECNOLOGICA"), Some(Dimension::Technological));
        assert_eq!(Dimension::parse_label("unknown"), None);
    }
}
