//! Live typed view of one collection subscription.

use std::sync::Arc;

use civilcrm_core::types::Keyed;
use civilcrm_store::{CollectionPath, RecordStore, Snapshot};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::{SessionError, SessionResult};

/// A collection subscription decoded into domain records.
///
/// A background pump forwards store snapshots into a watch channel, so
/// readers always see the latest decoded state and a slow reader only
/// skips intermediate states. Dropping the collection stops the pump
/// and ends the subscription.
pub struct LiveCollection<T> {
    rx: watch::Receiver<Vec<Keyed<T>>>,
    pump: JoinHandle<()>,
}

impl<T> LiveCollection<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub async fn open(store: &Arc<dyn RecordStore>, path: CollectionPath) -> SessionResult<Self> {
        let mut stream = store.subscribe(&path).await?;
        let (tx, rx) = watch::channel(decode_snapshot::<T>(&path, &stream.current()));

        let pump_path = path.clone();
        let pump = tokio::spawn(async move {
            while let Some(snapshot) = stream.next().await {
                tx.send_replace(decode_snapshot::<T>(&pump_path, &snapshot));
                if tx.is_closed() {
                    break;
                }
            }
        });

        Ok(Self { rx, pump })
    }

    /// The latest decoded snapshot, in id order.
    pub fn records(&self) -> Vec<Keyed<T>>
    where
        T: Clone,
    {
        self.rx.borrow().clone()
    }

    /// Wait until the snapshot changes. Returns `false` once the
    /// subscription has ended.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

impl<T> Drop for LiveCollection<T> {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Decode a raw snapshot in key order. A record that fails to decode is
/// logged and skipped; one bad document never blanks the collection.
fn decode_snapshot<T: DeserializeOwned>(path: &CollectionPath, snapshot: &Snapshot) -> Vec<Keyed<T>> {
    snapshot
        .iter()
        .filter_map(|(id, value)| match serde_json::from_value(value.clone()) {
            Ok(record) => Some(Keyed::new(id.clone(), record)),
            Err(err) => {
                warn!(path = %path, id = %id, %err, "skipping undecodable record");
                None
            }
        })
        .collect()
}

/// Serialize a record for storage.
pub(crate) fn to_document<T: Serialize>(record: &T) -> SessionResult<Value> {
    serde_json::to_value(record)
        .map_err(|err| SessionError::Core(civilcrm_core::error::CoreError::Internal(err.to_string())))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
