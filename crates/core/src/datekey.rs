//! Attendance ledger date keys.
//!
//! The ledger is partitioned by calendar date with separators stripped
//! (`2024-05-01` → `20240501`). Existing stored attendance data uses this
//! exact format, so it must be reproduced byte for byte.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::error::CoreError;

/// Ledger partition key for a calendar date.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Normalize a user-entered date string (`-`, `/`, or `.` separators) to
/// a ledger key, validating that it names a real calendar date.
pub fn normalize_date_key(input: &str) -> Result<String, CoreError> {
    let digits: String = input
        .chars()
        .filter(|c| !matches!(c, '-' | '/' | '.'))
        .collect();
    if digits.len() != 8 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(format!("Invalid date: {input}")));
    }
    NaiveDate::parse_from_str(&digits, "%Y%m%d")
        .map_err(|_| CoreError::Validation(format!("Invalid date: {input}")))?;
    Ok(digits)
}

/// Deserialize an optional `YYYY-MM-DD` date, treating empty or malformed
/// stored values as absent rather than failing the whole record.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
