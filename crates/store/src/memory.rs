//! In-memory store backend.
//!
//! Documents live in async-aware read-write locks, one per collection. The
//! backend honors the same deadline contract as the MongoDB backend and is
//! used by the test suite and for local development without a running
//! database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;
use tokio::time::timeout;

use crate::{Backend, Collection, Store, StoreError};

/// Backend keeping every collection in process memory.
#[derive(Default)]
pub struct MemoryBackend {
    collections: Mutex<HashMap<String, Arc<MemoryCollection>>>,
}

impl MemoryBackend {
    /// Convenience constructor returning a ready-to-use [`Store`].
    pub fn store() -> Store {
        Store::new(Arc::new(Self::default()))
    }
}

impl Backend for MemoryBackend {
    fn collection(&self, name: &str) -> Arc<dyn Collection> {
        let mut map = self
            .collections
            .lock()
            .expect("collection registry lock poisoned");
        map.entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryCollection::default()))
            .clone()
    }
}

#[derive(Default)]
struct MemoryCollection {
    documents: RwLock<Vec<Document>>,
}

/// Equality match: every filter key must be present with an equal value.
fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

#[async_trait]
impl Collection for MemoryCollection {
    async fn insert_one(
        &self,
        mut document: Document,
        deadline: Duration,
    ) -> Result<Bson, StoreError> {
        let insert = async {
            let id = match document.get("_id") {
                Some(id) => id.clone(),
                None => {
                    let id = Bson::ObjectId(ObjectId::new());
                    document.insert("_id", id.clone());
                    id
                }
            };
            self.documents.write().await.push(document);
            Ok(id)
        };
        timeout(deadline, insert)
            .await
            .map_err(|_| StoreError::DeadlineExceeded(deadline))?
    }

    async fn find(
        &self,
        filter: Document,
        deadline: Duration,
    ) -> Result<Vec<Document>, StoreError> {
        let scan = async {
            let documents = self.documents.read().await;
            Ok(documents
                .iter()
                .filter(|document| matches(document, &filter))
                .cloned()
                .collect())
        };
        timeout(deadline, scan)
            .await
            .map_err(|_| StoreError::DeadlineExceeded(deadline))?
    }

    async fn delete_many(
        &self,
        filter: Document,
        deadline: Duration,
    ) -> Result<u64, StoreError> {
        let delete = async {
            let mut documents = self.documents.write().await;
            let before = documents.len();
            documents.retain(|document| !matches(document, &filter));
            Ok((before - documents.len()) as u64)
        };
        timeout(deadline, delete)
            .await
            .map_err(|_| StoreError::DeadlineExceeded(deadline))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{doc, QUERY_DEADLINE, SCAN_DEADLINE, WRITE_DEADLINE};

    #[tokio::test]
    async fn insert_assigns_an_identifier() {
        let store = MemoryBackend::store();
        let books = store.collection("books");

        let id = books
            .insert_one(doc! { "isbn": "111" }, WRITE_DEADLINE)
            .await
            .unwrap();
        assert!(matches!(id, Bson::ObjectId(_)));
    }

    #[tokio::test]
    async fn empty_filter_scans_everything() {
        let store = MemoryBackend::store();
        let books = store.collection("books");

        for isbn in ["111", "222"] {
            books
                .insert_one(doc! { "isbn": isbn }, WRITE_DEADLINE)
                .await
                .unwrap();
        }

        let all = books.find(Document::new(), SCAN_DEADLINE).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn equality_filter_selects_matching_documents() {
        let store = MemoryBackend::store();
        let workers = store.collection("workers");

        workers
            .insert_one(doc! { "workName": "plumbing" }, WRITE_DEADLINE)
            .await
            .unwrap();
        workers
            .insert_one(doc! { "workName": "painting" }, WRITE_DEADLINE)
            .await
            .unwrap();

        let plumbers = workers
            .find(doc! { "workName": "plumbing" }, QUERY_DEADLINE)
            .await
            .unwrap();
        assert_eq!(plumbers.len(), 1);

        let none = workers
            .find(doc! { "workName": "roofing" }, QUERY_DEADLINE)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn delete_many_removes_every_match_and_reports_the_count() {
        let store = MemoryBackend::store();
        let books = store.collection("books");

        for _ in 0..3 {
            books
                .insert_one(doc! { "isbn": "dup" }, WRITE_DEADLINE)
                .await
                .unwrap();
        }
        books
            .insert_one(doc! { "isbn": "keep" }, WRITE_DEADLINE)
            .await
            .unwrap();

        let deleted = books
            .delete_many(doc! { "isbn": "dup" }, WRITE_DEADLINE)
            .await
            .unwrap();
        assert_eq!(deleted, 3);

        let remaining = books.find(Document::new(), SCAN_DEADLINE).await.unwrap();
        assert_eq!(remaining.len(), 1);
    }

    #[tokio::test]
    async fn deleting_an_absent_key_counts_zero() {
        let store = MemoryBackend::store();
        let books = store.collection("books");

        let deleted = books
            .delete_many(doc! { "isbn": "ghost" }, WRITE_DEADLINE)
            .await
            .unwrap();
        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn collections_are_isolated_by_name() {
        let store = MemoryBackend::store();
        store
            .collection("books")
            .insert_one(doc! { "isbn": "111" }, WRITE_DEADLINE)
            .await
            .unwrap();

        let workers = store
            .collection("workers")
            .find(Document::new(), SCAN_DEADLINE)
            .await
            .unwrap();
        assert!(workers.is_empty());
    }
}
