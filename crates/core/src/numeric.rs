//! Lenient decimal fields.
//!
//! Amount fields in the hosted database may be JSON numbers or their
//! string form (legacy documents were written straight from form inputs).
//! [`RawAmount`] keeps the stored representation and degrades per field:
//! a malformed value parses to `None`, aggregates as zero, and sorts as
//! the minimum. One bad record must never blank a whole view.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A decimal field exactly as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// Parse to a finite number, or `None` for malformed values.
    pub fn parse(&self) -> Option<f64> {
        match self {
            RawAmount::Number(n) if n.is_finite() => Some(*n),
            RawAmount::Number(_) => None,
            RawAmount::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Value for aggregation: malformed amounts count as zero.
    pub fn or_zero(&self) -> f64 {
        self.parse().unwrap_or(0.0)
    }

    /// Value for ordering: malformed amounts sort below every real value.
    pub fn sort_rank(&self) -> f64 {
        self.parse().unwrap_or(f64::NEG_INFINITY)
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

/// Parse a required positive amount from form input.
///
/// Blank, malformed, non-finite, and non-positive input all yield the
/// given classified validation message.
pub fn parse_positive(input: &str, message: &str) -> Result<f64, CoreError> {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(CoreError::Validation(message.to_string())),
    }
}

/// Parse a required non-negative amount from form input.
pub fn parse_non_negative(input: &str, message: &str) -> Result<f64, CoreError> {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(CoreError::Validation(message.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
