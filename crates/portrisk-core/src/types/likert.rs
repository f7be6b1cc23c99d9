//! Bounded ordinal response on the 1–5 Likert scale.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{LIKERT_MAX, LIKERT_MIN};

/// A single validated Likert response. Construction is the only place the
/// 1..=5 bound is checked; every downstream stage relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LikertResponse(u8);

impl LikertResponse {
    /// Create a response, returning `None` outside 1..=5.
    pub fn new(value: u8) -> Option<Self> {
        (LIKERT_MIN..=LIKERT_MAX).contains(&value).then_some(Self(value))
    }

    /// Accept a float only when it is integral and within range (`4.0` yes, `4.5` no).
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return None;
        }
        if value < LIKERT_MIN as f64 || value > LIKERT_MAX as f64 {
            return None;
        }
        Self::new(value as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Zero-based category index, for indexing per-category arrays.
    pub fn index(self) -> usize {
        (self.0 - LIKERT_MIN) as usize
    }

    /// True for the high-risk categories {4, 5}.
    pub fn is_high(self) -> bool {
        self.0 >= 4
    }

    /// True for the low-risk categories {1, 2}.
    pub fn is_low(self) -> bool {
        self.0 <= 2
    }
}

impl TryFrom<u8> for LikertResponse {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("Likert response {value} outside 1..=5"))
    }
}

impl From<LikertResponse> for u8 {
    fn from(r: LikertResponse) -> Self {
        r.0
    }
}

impl fmt::Display for LikertResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
