//! Canonical store paths for the project hierarchy.
//!
//! All collections hang off `projects/{id}`; the attendance ledger is
//! further partitioned by date key.

use civilcrm_store::CollectionPath;

pub fn projects() -> CollectionPath {
    CollectionPath::new(["projects"])
}

pub fn workers(project_id: &str) -> CollectionPath {
    CollectionPath::new(["projects", project_id, "workers"])
}

pub fn materials(project_id: &str) -> CollectionPath {
    CollectionPath::new(["projects", project_id, "materials"])
}

pub fn clients(project_id: &str) -> CollectionPath {
    CollectionPath::new(["projects", project_id, "clients"])
}

/// One day's attendance ledger. `date_key` must already be in `YYYYMMDD`
/// form, see `civilcrm_core::datekey`.
pub fn attendance(project_id: &str, date_key: &str) -> CollectionPath {
    CollectionPath::new(["projects", project_id, "attendance", date_key])
}
