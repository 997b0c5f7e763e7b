//! The record-store boundary.
//!
//! Collections of JSON documents live under slash-separated paths
//! (`projects/{id}/workers`). [`RecordStore`] is the async seam the
//! session layer programs against: snapshot subscriptions, push-id
//! creates, shallow-merge updates, overwrites, removes, and atomic
//! multi-record batches. [`MemoryStore`] is the in-process backend used
//! by the whole test suite; a hosted backend implements the same trait.

pub mod client;
pub mod error;
pub mod memory;
pub mod path;

pub use client::{RecordStore, Snapshot, SnapshotStream, WriteOp};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use path::{CollectionPath, RecordPath};
