//! In-process store backend.
//!
//! Backs the test suite and offline development. Collections live in a
//! map guarded by one async lock; every mutation publishes the whole
//! collection to its watch channel, which gives subscribers the same
//! coalescing behavior a hosted backend's listener would.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tokio::sync::{watch, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::client::{RecordStore, Snapshot, SnapshotStream, WriteOp};
use crate::error::{StoreError, StoreResult};
use crate::path::{CollectionPath, RecordPath};

struct CollectionState {
    records: Snapshot,
    tx: watch::Sender<Snapshot>,
}

impl CollectionState {
    fn new() -> Self {
        let (tx, _) = watch::channel(Snapshot::new());
        Self {
            records: Snapshot::new(),
            tx,
        }
    }

    fn publish(&self) {
        self.tx.send_replace(self.records.clone());
    }
}

/// In-memory [`RecordStore`]. Cheap to clone behind an `Arc`; the
/// offline flag simulates a lost connection for failure-path tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, CollectionState>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline, every operation fails with
    /// [`StoreError::Unavailable`]. Existing subscriptions keep their
    /// last snapshot.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// How many live subscriptions a collection currently has. Zero for
    /// a collection never subscribed or whose streams were all dropped.
    pub async fn subscriber_count(&self, path: &CollectionPath) -> usize {
        let collections = self.collections.read().await;
        collections
            .get(path.as_str())
            .map_or(0, |state| state.tx.receiver_count())
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }

    /// Time-ordered push id; later calls sort after earlier ones.
    fn push_id() -> String {
        Uuid::now_v7().to_string()
    }
}

/// Merge `patch`'s top-level fields into `target`. A non-object patch
/// replaces the record wholesale.
fn merge_shallow(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(existing), Value::Object(fields)) => {
            for (key, value) in fields {
                existing.insert(key, value);
            }
        }
        (target, patch) => *target = patch,
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn subscribe(&self, path: &CollectionPath) -> StoreResult<SnapshotStream> {
        self.check_online()?;
        let mut collections = self.collections.write().await;
        let state = collections
            .entry(path.as_str().to_string())
            .or_insert_with(CollectionState::new);
        debug!(path = %path, "subscribe");
        Ok(SnapshotStream::new(state.tx.subscribe()))
    }

    async fn create(&self, path: &CollectionPath, value: Value) -> StoreResult<String> {
        self.check_online()?;
        let id = Self::push_id();
        let mut collections = self.collections.write().await;
        let state = collections
            .entry(path.as_str().to_string())
            .or_insert_with(CollectionState::new);
        state.records.insert(id.clone(), value);
        state.publish();
        debug!(path = %path, id = %id, "create");
        Ok(id)
    }

    async fn update(&self, path: &RecordPath, value: Value) -> StoreResult<()> {
        self.check_online()?;
        let mut collections = self.collections.write().await;
        let state = collections
            .entry(path.collection().as_str().to_string())
            .or_insert_with(CollectionState::new);
        state
            .records
            .entry(path.id().to_string())
            .and_modify(|record| merge_shallow(record, value.clone()))
            .or_insert(value);
        state.publish();
        debug!(path = %path, "update");
        Ok(())
    }

    async fn put(&self, path: &RecordPath, value: Value) -> StoreResult<()> {
        self.check_online()?;
        let mut collections = self.collections.write().await;
        let state = collections
            .entry(path.collection().as_str().to_string())
            .or_insert_with(CollectionState::new);
        state.records.insert(path.id().to_string(), value);
        state.publish();
        debug!(path = %path, "put");
        Ok(())
    }

    async fn remove(&self, path: &RecordPath) -> StoreResult<()> {
        self.check_online()?;
        let mut collections = self.collections.write().await;
        if let Some(state) = collections.get_mut(path.collection().as_str()) {
            if state.records.remove(path.id()).is_some() {
                state.publish();
            }
        }
        debug!(path = %path, "remove");
        Ok(())
    }

    async fn batch_write(&self, ops: Vec<WriteOp>) -> StoreResult<()> {
        self.check_online()?;
        // One lock held across every op keeps the batch atomic; each
        // touched collection publishes exactly once at the end.
        let mut collections = self.collections.write().await;
        let mut touched: Vec<String> = Vec::new();
        for op in ops {
            let (collection, id) = match &op {
                WriteOp::Put(path, _) | WriteOp::Remove(path) => {
                    (path.collection().as_str().to_string(), path.id().to_string())
                }
            };
            let state = collections
                .entry(collection.clone())
                .or_insert_with(CollectionState::new);
            match op {
                WriteOp::Put(_, value) => {
                    state.records.insert(id, value);
                }
                WriteOp::Remove(_) => {
                    state.records.remove(&id);
                }
            }
            if !touched.contains(&collection) {
                touched.push(collection);
            }
        }
        for collection in &touched {
            if let Some(state) = collections.get(collection.as_str()) {
                state.publish();
            }
        }
        debug!(collections = touched.len(), "batch_write");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
