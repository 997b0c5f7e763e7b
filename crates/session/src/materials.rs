//! The material inventory service.

use std::sync::Arc;

use civilcrm_core::error::CoreError;
use civilcrm_core::material::{
    summarize, Material, MaterialFilter, MaterialForm, MaterialSortKey, MaterialSummary,
};
use civilcrm_core::types::{Keyed, RecordId};
use civilcrm_core::view::{derive_rows, ViewState};
use civilcrm_store::{CollectionPath, RecordStore};
use tracing::info;

use crate::collection::{to_document, LiveCollection};
use crate::confirm::RemovalRequest;
use crate::error::SessionResult;
use crate::paths;

#[derive(Debug)]
pub struct MaterialView {
    pub rows: Vec<Keyed<Material>>,
    pub summary: MaterialSummary,
}

/// One project's material inventory, live against the store.
///
/// The low-stock threshold lives in the view filter and is shared with
/// the summary, so the filtered rows and the low-stock count can never
/// disagree about what counts as low.
pub struct MaterialInventory {
    store: Arc<dyn RecordStore>,
    path: CollectionPath,
    collection: LiveCollection<Material>,
    pub view: ViewState<MaterialSortKey, MaterialFilter>,
}

impl MaterialInventory {
    pub async fn open(
        store: Arc<dyn RecordStore>,
        project_id: &str,
        low_stock_threshold: f64,
    ) -> SessionResult<Self> {
        let path = paths::materials(project_id);
        let collection = LiveCollection::open(&store, path.clone()).await?;
        let mut view: ViewState<MaterialSortKey, MaterialFilter> = ViewState::default();
        view.filter.low_stock_threshold = low_stock_threshold;
        Ok(Self {
            store,
            path,
            collection,
            view,
        })
    }

    pub fn records(&self) -> Vec<Keyed<Material>> {
        self.collection.records()
    }

    pub fn view(&self) -> MaterialView {
        let records = self.records();
        MaterialView {
            rows: derive_rows(&records, &self.view).into_iter().cloned().collect(),
            summary: summarize(&records, self.view.filter.low_stock_threshold),
        }
    }

    pub async fn changed(&mut self) -> bool {
        self.collection.changed().await
    }

    pub async fn add(&self, form: MaterialForm) -> SessionResult<RecordId> {
        let material = form.into_record()?;
        let id = self.store.create(&self.path, to_document(&material)?).await?;
        info!(material = %material.name, %id, "material added");
        Ok(id)
    }

    pub async fn update(&self, id: &str, form: MaterialForm) -> SessionResult<()> {
        let material = form.into_record()?;
        self.store
            .update(&self.path.record(id), to_document(&material)?)
            .await?;
        info!(%id, "material updated");
        Ok(())
    }

    pub fn remove_request(&self, id: &str) -> SessionResult<RemovalRequest> {
        let records = self.records();
        let material = records
            .iter()
            .find(|k| k.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "material",
                id: id.to_string(),
            })?;
        Ok(RemovalRequest::new(
            Arc::clone(&self.store),
            self.path.record(id),
            format!(
                "Are you sure you want to remove {} from the inventory?",
                material.record.name
            ),
        ))
    }
}
