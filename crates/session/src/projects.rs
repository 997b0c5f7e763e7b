//! The project registry service.

use std::sync::Arc;

use chrono::NaiveDate;
use civilcrm_core::error::CoreError;
use civilcrm_core::project::{Project, ProjectForm};
use civilcrm_core::types::{Keyed, RecordId};
use civilcrm_store::{CollectionPath, RecordStore};
use serde_json::json;
use tracing::info;

use crate::collection::{to_document, LiveCollection};
use crate::confirm::RemovalRequest;
use crate::error::SessionResult;
use crate::paths;

/// The top-level `projects` collection, live against the store.
pub struct ProjectRegistry {
    store: Arc<dyn RecordStore>,
    path: CollectionPath,
    collection: LiveCollection<Project>,
}

impl ProjectRegistry {
    pub async fn open(store: Arc<dyn RecordStore>) -> SessionResult<Self> {
        let path = paths::projects();
        let collection = LiveCollection::open(&store, path.clone()).await?;
        Ok(Self {
            store,
            path,
            collection,
        })
    }

    pub fn records(&self) -> Vec<Keyed<Project>> {
        self.collection.records()
    }

    pub fn get(&self, id: &str) -> Option<Keyed<Project>> {
        self.records().into_iter().find(|k| k.id == id)
    }

    pub async fn changed(&mut self) -> bool {
        self.collection.changed().await
    }

    /// Validate and store a new project, stamped with today as its
    /// creation date.
    pub async fn add(&self, form: ProjectForm, today: NaiveDate) -> SessionResult<RecordId> {
        let project = form.into_record(today)?;
        let id = self.store.create(&self.path, to_document(&project)?).await?;
        info!(project = %project.name, %id, "project added");
        Ok(id)
    }

    /// Validate and merge the editable fields into an existing project.
    /// Task counters and the creation stamp are never touched here.
    pub async fn update(&self, id: &str, form: ProjectForm, today: NaiveDate) -> SessionResult<()> {
        let project = form.into_record(today)?;
        let patch = json!({
            "name": project.name,
            "description": project.description,
            "priority": project.priority,
            "deadline": project.deadline,
        });
        self.store.update(&self.path.record(id), patch).await?;
        info!(%id, "project updated");
        Ok(())
    }

    /// Record task progress, which drives the derived completion
    /// percentage and status.
    pub async fn set_task_progress(
        &self,
        id: &str,
        completed_tasks: u32,
        tasks: u32,
    ) -> SessionResult<()> {
        if completed_tasks > tasks {
            return Err(CoreError::Validation(
                "Completed tasks cannot exceed total tasks".into(),
            )
            .into());
        }
        let patch = json!({
            "tasks": tasks,
            "completedTasks": completed_tasks,
        });
        self.store.update(&self.path.record(id), patch).await?;
        info!(%id, completed_tasks, tasks, "task progress recorded");
        Ok(())
    }

    /// Begin removing a project. Nothing is deleted until the returned
    /// request is confirmed.
    pub fn remove_request(&self, id: &str) -> SessionResult<RemovalRequest> {
        let project = self.get(id).ok_or_else(|| CoreError::NotFound {
            entity: "project",
            id: id.to_string(),
        })?;
        Ok(RemovalRequest::new(
            Arc::clone(&self.store),
            self.path.record(id),
            format!(
                "Are you sure you want to remove {} from the projects list?",
                project.record.name
            ),
        ))
    }
}
