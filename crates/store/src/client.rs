//! The store trait and its subscription stream.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;

use crate::error::StoreResult;
use crate::path::{CollectionPath, RecordPath};

/// Full contents of one collection, id-ordered. Every notification
/// carries the whole collection, never a delta.
pub type Snapshot = BTreeMap<String, Value>;

// ---------------------------------------------------------------------------
// Subscription stream
// ---------------------------------------------------------------------------

/// A live subscription to one collection.
///
/// Built on a watch channel, so a consumer that falls behind sees only
/// the latest snapshot; intermediate states are coalesced away. Dropping
/// the stream ends the subscription.
#[derive(Debug)]
pub struct SnapshotStream {
    rx: watch::Receiver<Snapshot>,
}

impl SnapshotStream {
    pub fn new(rx: watch::Receiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// The latest snapshot, without waiting.
    pub fn current(&self) -> Snapshot {
        self.rx.borrow().clone()
    }

    /// Wait for the next change and return the new snapshot. Returns
    /// `None` once the collection's publisher is gone.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

// ---------------------------------------------------------------------------
// Write batches
// ---------------------------------------------------------------------------

/// One entry of an atomic multi-path write.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Overwrite the record at the path (create if absent).
    Put(RecordPath, Value),
    /// Delete the record at the path.
    Remove(RecordPath),
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Async boundary to the document store.
///
/// All writes settle remotely before the returned future resolves;
/// subscribers then observe the new state. Object-safe so sessions can
/// hold `Arc<dyn RecordStore>`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Subscribe to a collection. The stream's initial value is the
    /// current snapshot (empty for a collection never written).
    async fn subscribe(&self, path: &CollectionPath) -> StoreResult<SnapshotStream>;

    /// Create a record under a fresh store-assigned push id and return
    /// the id. Push ids sort after all previously assigned ids.
    async fn create(&self, path: &CollectionPath, value: Value) -> StoreResult<String>;

    /// Shallow-merge `value`'s top-level fields into the record,
    /// creating it if absent. Fields not named are left untouched.
    async fn update(&self, path: &RecordPath, value: Value) -> StoreResult<()>;

    /// Overwrite the record wholesale, creating it if absent.
    async fn put(&self, path: &RecordPath, value: Value) -> StoreResult<()>;

    /// Delete the record. Removing an absent record is a no-op.
    async fn remove(&self, path: &RecordPath) -> StoreResult<()>;

    /// Apply every op atomically: subscribers observe all of them in one
    /// snapshot or none at all.
    async fn batch_write(&self, ops: Vec<WriteOp>) -> StoreResult<()>;
}
