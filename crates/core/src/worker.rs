//! Worker roster: entity, form validation, summaries, and the role
//! suggestion set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::datekey::lenient_date;
use crate::error::CoreError;
use crate::numeric::{parse_positive, RawAmount};
use crate::types::Keyed;
use crate::view::{RecordFilter, SortValue, ViewRecord};

/// Standard construction roles seeding every session's suggestion set.
pub const STANDARD_ROLES: &[&str] = &[
    "Mason",
    "Laborer",
    "Carpenter",
    "Plumber",
    "Electrician",
    "Painter",
    "Welder",
    "Machine Operator",
    "Supervisor",
    "Helper",
];

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A worker document under `projects/{id}/workers`.
///
/// Field names match the stored documents: the role tag is persisted as
/// `type`, and `wage` (the daily rate) stays in raw stored form so a
/// malformed legacy value degrades per the numeric-leniency policy
/// instead of dropping the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub name: String,
    #[serde(rename = "type")]
    pub role: String,
    pub wage: RawAmount,
    pub contact: String,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub address: String,
    /// Expected to attend every work day; legacy documents default false.
    #[serde(default)]
    pub is_regular: bool,
}

// ---------------------------------------------------------------------------
// Form input
// ---------------------------------------------------------------------------

/// Form input for creating or editing a worker. Amount fields arrive as
/// the raw strings the user typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerForm {
    pub name: String,
    pub role: String,
    pub wage: String,
    pub contact: String,
    pub joining_date: Option<NaiveDate>,
    pub address: String,
    pub is_regular: bool,
}

impl WorkerForm {
    /// Validate and build the record to store. `today` fills in a missing
    /// joining date. Every check runs before any store mutation; the
    /// message is user-facing.
    pub fn into_record(self, today: NaiveDate) -> Result<Worker, CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Worker name is required".into()));
        }
        if self.role.trim().is_empty() {
            return Err(CoreError::Validation("Worker type is required".into()));
        }
        let wage = parse_positive(&self.wage, "Valid wage amount is required")?;
        if self.contact.trim().is_empty() {
            return Err(CoreError::Validation("Contact number is required".into()));
        }

        Ok(Worker {
            name: self.name.trim().to_string(),
            role: self.role.trim().to_string(),
            wage: RawAmount::Number(wage),
            contact: self.contact.trim().to_string(),
            joining_date: Some(self.joining_date.unwrap_or(today)),
            address: self.address.trim().to_string(),
            is_regular: self.is_regular,
        })
    }
}

// ---------------------------------------------------------------------------
// View integration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerSortKey {
    Name,
    Role,
    Wage,
}

impl ViewRecord for Worker {
    type SortKey = WorkerSortKey;

    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.role.to_lowercase().contains(needle)
            || self.contact.to_lowercase().contains(needle)
    }

    fn sort_value(&self, key: WorkerSortKey) -> SortValue {
        match key {
            WorkerSortKey::Name => SortValue::Text(self.name.clone()),
            WorkerSortKey::Role => SortValue::Text(self.role.clone()),
            WorkerSortKey::Wage => SortValue::Amount(self.wage.sort_rank()),
        }
    }
}

/// Structured roster filter; `None` matches every role.
#[derive(Debug, Clone, Default)]
pub struct WorkerFilter {
    pub role: Option<String>,
}

impl RecordFilter<Worker> for WorkerFilter {
    fn accept(&self, worker: &Worker) -> bool {
        self.role.as_deref().map_or(true, |role| worker.role == role)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerSummary {
    pub total_workers: usize,
    pub average_wage: f64,
    pub total_daily_wage: f64,
    pub most_common_role: Option<String>,
}

/// Aggregate the full roster, independent of any view filter.
///
/// Malformed wages contribute zero. `most_common_role` breaks count ties
/// by first occurrence in snapshot key order.
pub fn summarize(workers: &[Keyed<Worker>]) -> WorkerSummary {
    let total_daily_wage: f64 = workers.iter().map(|w| w.record.wage.or_zero()).sum();
    let average_wage = if workers.is_empty() {
        0.0
    } else {
        total_daily_wage / workers.len() as f64
    };

    // Counts in first-occurrence order, so the strict `>` below keeps the
    // earliest role on ties.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for worker in workers {
        match counts.iter_mut().find(|(role, _)| *role == worker.record.role) {
            Some((_, n)) => *n += 1,
            None => counts.push((worker.record.role.as_str(), 1)),
        }
    }
    let mut most_common_role: Option<(&str, usize)> = None;
    for &(role, n) in &counts {
        if most_common_role.map_or(true, |(_, best)| n > best) {
            most_common_role = Some((role, n));
        }
    }

    WorkerSummary {
        total_workers: workers.len(),
        average_wage,
        total_daily_wage,
        most_common_role: most_common_role.map(|(role, _)| role.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Role suggestions
// ---------------------------------------------------------------------------

/// Role suggestion set offered by the worker form.
///
/// Owned, explicit state threaded through callers rather than a
/// module-level list. Grows monotonically; entries are deduplicated by
/// exact match only, so case variants remain distinct entries.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSuggestions {
    entries: Vec<String>,
}

impl RoleSuggestions {
    /// Seeded with [`STANDARD_ROLES`].
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_ROLES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add a role tag unless an identical entry already exists. Returns
    /// whether the set grew. Blank tags are ignored.
    pub fn add_if_absent(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.entries.iter().any(|entry| entry == tag) {
            return false;
        }
        self.entries.push(tag.to_string());
        true
    }

    /// Absorb every role present in a roster snapshot.
    pub fn absorb(&mut self, workers: &[Keyed<Worker>]) {
        for worker in workers {
            self.add_if_absent(&worker.record.role);
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RoleSuggestions {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
