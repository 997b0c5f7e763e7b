//! The worker roster service.

use std::sync::Arc;

use chrono::NaiveDate;
use civilcrm_core::error::CoreError;
use civilcrm_core::types::{Keyed, RecordId};
use civilcrm_core::view::{derive_rows, ViewState};
use civilcrm_core::worker::{
    summarize, RoleSuggestions, Worker, WorkerFilter, WorkerForm, WorkerSortKey, WorkerSummary,
};
use civilcrm_store::{CollectionPath, RecordStore};
use tracing::info;

use crate::collection::{to_document, LiveCollection};
use crate::confirm::RemovalRequest;
use crate::error::SessionResult;
use crate::paths;

/// Derived roster page state: the visible rows plus the whole-roster
/// summary. The summary ignores the view filter on purpose.
#[derive(Debug)]
pub struct WorkerView {
    pub rows: Vec<Keyed<Worker>>,
    pub summary: WorkerSummary,
}

/// One project's worker roster, live against the store.
pub struct WorkerRoster {
    store: Arc<dyn RecordStore>,
    path: CollectionPath,
    collection: LiveCollection<Worker>,
    pub view: ViewState<WorkerSortKey, WorkerFilter>,
}

impl WorkerRoster {
    pub async fn open(store: Arc<dyn RecordStore>, project_id: &str) -> SessionResult<Self> {
        let path = paths::workers(project_id);
        let collection = LiveCollection::open(&store, path.clone()).await?;
        Ok(Self {
            store,
            path,
            collection,
            view: ViewState::default(),
        })
    }

    /// The full roster snapshot, unfiltered.
    pub fn records(&self) -> Vec<Keyed<Worker>> {
        self.collection.records()
    }

    /// Derive the page from the current snapshot and view state.
    pub fn view(&self) -> WorkerView {
        let records = self.records();
        WorkerView {
            rows: derive_rows(&records, &self.view).into_iter().cloned().collect(),
            summary: summarize(&records),
        }
    }

    /// Wait for the next roster change.
    pub async fn changed(&mut self) -> bool {
        self.collection.changed().await
    }

    /// Validate and store a new worker. On success the role joins the
    /// suggestion set for later forms.
    pub async fn add(
        &self,
        form: WorkerForm,
        today: NaiveDate,
        roles: &mut RoleSuggestions,
    ) -> SessionResult<RecordId> {
        let worker = form.into_record(today)?;
        let id = self.store.create(&self.path, to_document(&worker)?).await?;
        roles.add_if_absent(&worker.role);
        info!(worker = %worker.name, %id, "worker added");
        Ok(id)
    }

    /// Validate and overwrite an existing worker's fields.
    pub async fn update(&self, id: &str, form: WorkerForm, today: NaiveDate) -> SessionResult<()> {
        let worker = form.into_record(today)?;
        self.store
            .update(&self.path.record(id), to_document(&worker)?)
            .await?;
        info!(%id, "worker updated");
        Ok(())
    }

    /// Begin removing a worker. Nothing is deleted until the returned
    /// request is confirmed.
    pub fn remove_request(&self, id: &str) -> SessionResult<RemovalRequest> {
        let records = self.records();
        let worker = records
            .iter()
            .find(|k| k.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "worker",
                id: id.to_string(),
            })?;
        Ok(RemovalRequest::new(
            Arc::clone(&self.store),
            self.path.record(id),
            format!(
                "Are you sure you want to remove {} from the workers list?",
                worker.record.name
            ),
        ))
    }
}
