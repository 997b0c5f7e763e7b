//! The per-project dashboard overview.
//!
//! Every figure is computed from the live collections; nothing here is
//! estimated or sampled.

use chrono::NaiveDate;
use civilcrm_core::attendance::{summarize_day, AttendanceRecord, DailySummary};
use civilcrm_core::client::{Client, ClientSummary};
use civilcrm_core::material::{Material, MaterialSummary};
use civilcrm_core::project::{Project, ProjectStatus};
use civilcrm_core::types::Keyed;
use civilcrm_core::worker::{Worker, WorkerSummary};
use civilcrm_core::{client, material, worker};
use serde::Serialize;

/// Aggregated standing of one project as of `today`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectOverview {
    pub status: ProjectStatus,
    pub completion_percent: u32,
    pub days_remaining: Option<i64>,
    pub workers: WorkerSummary,
    pub materials: MaterialSummary,
    pub clients: ClientSummary,
    pub attendance_today: DailySummary,
}

impl ProjectOverview {
    pub fn assemble(
        project: &Project,
        today: NaiveDate,
        workers: &[Keyed<Worker>],
        materials: &[Keyed<Material>],
        clients: &[Keyed<Client>],
        attendance_today: &[Keyed<AttendanceRecord>],
        low_stock_threshold: f64,
    ) -> Self {
        Self {
            status: project.status(today),
            completion_percent: project.completion_percent(),
            days_remaining: project.days_remaining(today),
            workers: worker::summarize(workers),
            materials: material::summarize(materials, low_stock_threshold),
            clients: client::summarize(clients),
            attendance_today: summarize_day(
                attendance_today.iter().map(|k| (&k.id, &k.record)),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
