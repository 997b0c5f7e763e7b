use serde::Serialize;

/// Record ids are opaque, store-assigned push ids (time-ordered strings).
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A record paired with its store-assigned id, as produced by flattening
/// a collection snapshot in key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyed<R> {
    pub id: RecordId,
    pub record: R,
}

impl<R> Keyed<R> {
    pub fn new(id: impl Into<RecordId>, record: R) -> Self {
        Self {
            id: id.into(),
            record,
        }
    }
}
