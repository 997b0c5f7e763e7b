//! Attendance ledger entries and the daily liability summary.
//!
//! Each entry snapshots the worker's wage at marking time. Later wage
//! edits on the roster never rewrite history; the ledger is the payroll
//! record of what each day actually cost.

use serde::{Deserialize, Serialize};

use crate::types::{RecordId, Timestamp};
use crate::worker::Worker;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One worker's entry under `projects/{id}/attendance/{dateKey}`, keyed
/// by worker id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub present: bool,
    /// When the mark was made, not the ledger date.
    pub time: Timestamp,
    /// Wage captured at marking time. Plain number: entries are written
    /// by this system, never typed by hand.
    #[serde(default)]
    pub wage: f64,
}

impl AttendanceRecord {
    /// Build the entry for marking `worker` now. A malformed roster wage
    /// snapshots as zero.
    pub fn mark(worker: &Worker, present: bool, time: Timestamp) -> Self {
        Self {
            present,
            time,
            wage: worker.wage.or_zero(),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub present_count: usize,
    /// Sum of snapshotted wages of present workers.
    pub total_liability: f64,
}

/// Aggregate one day's ledger. Entries for workers since removed from
/// the roster still count; the money was owed either way.
pub fn summarize_day<'a, I>(entries: I) -> DailySummary
where
    I: IntoIterator<Item = (&'a RecordId, &'a AttendanceRecord)>,
{
    let mut present_count = 0;
    let mut total_liability = 0.0;
    for (_, entry) in entries {
        if entry.present {
            present_count += 1;
            total_liability += entry.wage;
        }
    }
    DailySummary {
        present_count,
        total_liability,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
