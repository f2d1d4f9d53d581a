//! Document store handle for handyhub.
//!
//! The [`Store`] is constructed once at startup and cloned into every module;
//! it is never reassigned afterwards. Each named collection exposes exactly
//! three calls (`insert_one`, `find`, `delete_many`), and every call is
//! bounded by an explicit deadline. Concurrency safety across in-flight
//! requests is delegated entirely to the backend.

pub mod error;
pub mod memory;
pub mod mongo;

pub use bson::{doc, oid, Bson, Document};
pub use error::StoreError;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Deadline for single-document writes and deletes.
pub const WRITE_DEADLINE: Duration = Duration::from_secs(5);

/// Deadline for full-collection scans. Longer than the write deadline since
/// result size is unbounded.
pub const SCAN_DEADLINE: Duration = Duration::from_secs(10);

/// Deadline for equality-filtered queries.
pub const QUERY_DEADLINE: Duration = Duration::from_secs(5);

/// A named, schema-less grouping of documents within the store.
///
/// Implementations must be safe for concurrent use; the operation layer
/// issues calls from many requests at once without any coordination.
#[async_trait]
pub trait Collection: Send + Sync {
    /// Insert a single document and return the identifier the store assigned.
    async fn insert_one(&self, document: Document, deadline: Duration)
        -> Result<Bson, StoreError>;

    /// Return every document matching the filter, in the backend's natural
    /// iteration order. An empty filter scans the whole collection.
    async fn find(&self, filter: Document, deadline: Duration)
        -> Result<Vec<Document>, StoreError>;

    /// Remove every document matching the filter and return how many were
    /// removed. Matching nothing is not an error here.
    async fn delete_many(&self, filter: Document, deadline: Duration)
        -> Result<u64, StoreError>;
}

/// A backend supplies per-collection accessors.
pub trait Backend: Send + Sync {
    fn collection(&self, name: &str) -> Arc<dyn Collection>;
}

/// Shared, immutable-after-init handle to the document store.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
}

impl Store {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn collection(&self, name: &str) -> Arc<dyn Collection> {
        self.backend.collection(name)
    }
}
