//! The daily attendance sheet service.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use civilcrm_core::attendance::{summarize_day, AttendanceRecord, DailySummary};
use civilcrm_core::datekey::date_key;
use civilcrm_core::types::Keyed;
use civilcrm_core::worker::Worker;
use civilcrm_store::{CollectionPath, RecordStore, WriteOp};
use tracing::info;

use crate::collection::{to_document, LiveCollection};
use crate::error::SessionResult;
use crate::paths;

/// One project-day's attendance ledger, live against the store.
///
/// Entries are keyed by worker id and snapshot the wage at marking
/// time; re-marking overwrites the entry with a fresh snapshot and
/// timestamp. Entries for workers since removed from the roster are
/// kept and still counted.
pub struct AttendanceSheet {
    store: Arc<dyn RecordStore>,
    path: CollectionPath,
    collection: LiveCollection<AttendanceRecord>,
}

impl AttendanceSheet {
    pub async fn open(
        store: Arc<dyn RecordStore>,
        project_id: &str,
        date: NaiveDate,
    ) -> SessionResult<Self> {
        let path = paths::attendance(project_id, &date_key(date));
        let collection = LiveCollection::open(&store, path.clone()).await?;
        Ok(Self {
            store,
            path,
            collection,
        })
    }

    /// The day's entries keyed by worker id.
    pub fn entries(&self) -> Vec<Keyed<AttendanceRecord>> {
        self.collection.records()
    }

    /// Wait for the next ledger change.
    pub async fn changed(&mut self) -> bool {
        self.collection.changed().await
    }

    /// Mark one worker present or absent, snapshotting the current
    /// roster wage into the entry.
    pub async fn mark(&self, worker_id: &str, worker: &Worker, present: bool) -> SessionResult<()> {
        let entry = AttendanceRecord::mark(worker, present, Utc::now());
        self.store
            .put(&self.path.record(worker_id), to_document(&entry)?)
            .await?;
        info!(%worker_id, present, wage = entry.wage, "attendance marked");
        Ok(())
    }

    /// Mark every regular worker on the roster present in one atomic
    /// batch. Returns how many entries were written; zero regulars is a
    /// successful no-op.
    pub async fn mark_all_regular(&self, roster: &[Keyed<Worker>]) -> SessionResult<usize> {
        let now = Utc::now();
        let mut ops = Vec::new();
        for worker in roster.iter().filter(|k| k.record.is_regular) {
            let entry = AttendanceRecord::mark(&worker.record, true, now);
            ops.push(WriteOp::Put(self.path.record(&worker.id), to_document(&entry)?));
        }
        let count = ops.len();
        if count > 0 {
            self.store.batch_write(ops).await?;
        }
        info!(count, "regular workers marked present");
        Ok(count)
    }

    /// Present headcount and wage liability for the day.
    pub fn daily_summary(&self) -> DailySummary {
        let entries = self.entries();
        summarize_day(entries.iter().map(|k| (&k.id, &k.record)))
    }
}
