//! Slash-separated store paths.
//!
//! Paths are built through typed constructors rather than string
//! concatenation at call sites, so a typo in a segment name cannot
//! silently create a new collection.

use std::fmt;

// ---------------------------------------------------------------------------
// Collection paths
// ---------------------------------------------------------------------------

/// The path of a collection, e.g. `projects/p1/workers`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Build from segments. Segments must be non-empty and free of `/`.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = segments
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("/");
        debug_assert!(!joined.is_empty() && !joined.contains("//"));
        Self(joined)
    }

    /// The path of one record within this collection.
    pub fn record(&self, id: &str) -> RecordPath {
        RecordPath {
            collection: self.clone(),
            id: id.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Record paths
// ---------------------------------------------------------------------------

/// The path of a single record, `{collection}/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordPath {
    collection: CollectionPath,
    id: String,
}

impl RecordPath {
    pub fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
