//! Clutter score as written in the JSON documents
//!
//! Scores keep the number form they were read with: `42` stays `42` and
//! `42.5` stays `42.5` when a log is rewritten. Comparison is by value.

use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(Number);

impl Score {
    /// Numeric value, for display and banding
    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }

    /// Whether the score was written as an integer
    pub fn is_integer(&self) -> bool {
        self.0.is_i64() || self.0.is_u64()
    }
}

impl Default for Score {
    fn default() -> Self {
        Self(Number::from(0u32))
    }
}

impl From<u32> for Score {
    fn from(value: u32) -> Self {
        Self(Number::from(value))
    }
}

impl From<i64> for Score {
    fn from(value: i64) -> Self {
        Self(Number::from(value))
    }
}

/// Non-finite values have no JSON form and become 0
impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map(Self).unwrap_or_default()
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        match (self.0.as_i64(), other.0.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => match (self.0.as_u64(), other.0.as_u64()) {
                (Some(a), Some(b)) => a == b,
                _ => self.as_f64() == other.as_f64(),
            },
        }
    }
}

impl PartialEq<f64> for Score {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == *other
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
