//! The client ledger service.

use std::sync::Arc;

use civilcrm_core::client::{
    summarize, Client, ClientFilter, ClientForm, ClientSortKey, ClientSummary,
};
use civilcrm_core::error::CoreError;
use civilcrm_core::types::{Keyed, RecordId};
use civilcrm_core::view::{derive_rows, ViewState};
use civilcrm_store::{CollectionPath, RecordStore};
use tracing::info;

use crate::collection::{to_document, LiveCollection};
use crate::confirm::RemovalRequest;
use crate::error::SessionResult;
use crate::paths;

#[derive(Debug)]
pub struct ClientView {
    pub rows: Vec<Keyed<Client>>,
    pub summary: ClientSummary,
}

/// One project's client ledger, live against the store.
pub struct ClientLedger {
    store: Arc<dyn RecordStore>,
    path: CollectionPath,
    collection: LiveCollection<Client>,
    pub view: ViewState<ClientSortKey, ClientFilter>,
}

impl ClientLedger {
    pub async fn open(store: Arc<dyn RecordStore>, project_id: &str) -> SessionResult<Self> {
        let path = paths::clients(project_id);
        let collection = LiveCollection::open(&store, path.clone()).await?;
        Ok(Self {
            store,
            path,
            collection,
            view: ViewState::default(),
        })
    }

    pub fn records(&self) -> Vec<Keyed<Client>> {
        self.collection.records()
    }

    pub fn view(&self) -> ClientView {
        let records = self.records();
        ClientView {
            rows: derive_rows(&records, &self.view).into_iter().cloned().collect(),
            summary: summarize(&records),
        }
    }

    pub async fn changed(&mut self) -> bool {
        self.collection.changed().await
    }

    pub async fn add(&self, form: ClientForm) -> SessionResult<RecordId> {
        let client = form.into_record()?;
        let id = self.store.create(&self.path, to_document(&client)?).await?;
        info!(client = %client.name, %id, "client added");
        Ok(id)
    }

    pub async fn update(&self, id: &str, form: ClientForm) -> SessionResult<()> {
        let client = form.into_record()?;
        self.store
            .update(&self.path.record(id), to_document(&client)?)
            .await?;
        info!(%id, "client updated");
        Ok(())
    }

    pub fn remove_request(&self, id: &str) -> SessionResult<RemovalRequest> {
        let records = self.records();
        let client = records
            .iter()
            .find(|k| k.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "client",
                id: id.to_string(),
            })?;
        Ok(RemovalRequest::new(
            Arc::clone(&self.store),
            self.path.record(id),
            format!(
                "Are you sure you want to remove {} from the clients list?",
                client.record.name
            ),
        ))
    }
}
