//! Store operations for the workers collection.
//!
//! Same shape as the books operations: one deadline-bounded store call per
//! operation, no state across invocations. The filtered lookup keeps the 5s
//! query deadline while the full scan gets the longer 10s one.

use bson::{doc, Bson, Document};
use handyhub_store::{Collection, StoreError, QUERY_DEADLINE, SCAN_DEADLINE, WRITE_DEADLINE};

use super::models::{Worker, WorkerProfile};

pub const WORKERS_COLLECTION: &str = "workers";

/// Insert a minimal worker record.
pub async fn add_worker(workers: &dyn Collection, worker: &Worker) -> Result<Bson, StoreError> {
    let document = bson::to_document(worker)?;
    workers.insert_one(document, WRITE_DEADLINE).await
}

/// Insert a full worker profile and return the store-assigned identifier.
pub async fn add_worker_profile(
    workers: &dyn Collection,
    profile: &WorkerProfile,
) -> Result<Bson, StoreError> {
    let document = bson::to_document(profile)?;
    workers.insert_one(document, WRITE_DEADLINE).await
}

/// Full collection scan over every worker record.
pub async fn list_workers(workers: &dyn Collection) -> Result<Vec<Document>, StoreError> {
    workers.find(Document::new(), SCAN_DEADLINE).await
}

/// Equality-filtered lookup on the work name. An empty result is the
/// caller's cue for a not-found response, unlike the full scan.
pub async fn find_by_work_name(
    workers: &dyn Collection,
    work_name: &str,
) -> Result<Vec<Document>, StoreError> {
    workers
        .find(doc! { "workName": work_name }, QUERY_DEADLINE)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::workers::models::Coordinates;
    use handyhub_store::memory::MemoryBackend;

    fn plumber(name: &str) -> WorkerProfile {
        WorkerProfile {
            name: name.to_string(),
            work_name: "plumbing".to_string(),
            img_url: "x".to_string(),
            coordinates_of_worker: Coordinates {
                latitude: 1.0,
                longitude: 2.0,
            },
            cost_per_hour: 50,
        }
    }

    #[tokio::test]
    async fn profiles_are_found_by_work_name() {
        let store = MemoryBackend::store();
        let workers = store.collection(WORKERS_COLLECTION);

        add_worker_profile(workers.as_ref(), &plumber("Jo"))
            .await
            .unwrap();
        add_worker_profile(
            workers.as_ref(),
            &WorkerProfile {
                work_name: "painting".to_string(),
                ..plumber("Pat")
            },
        )
        .await
        .unwrap();

        let plumbers = find_by_work_name(workers.as_ref(), "plumbing")
            .await
            .unwrap();
        assert_eq!(plumbers.len(), 1);
        assert_eq!(plumbers[0].get_str("name").unwrap(), "Jo");

        let roofers = find_by_work_name(workers.as_ref(), "roofing").await.unwrap();
        assert!(roofers.is_empty());
    }

    #[tokio::test]
    async fn simple_workers_show_up_in_the_scan() {
        let store = MemoryBackend::store();
        let workers = store.collection(WORKERS_COLLECTION);

        add_worker(
            workers.as_ref(),
            &Worker {
                img_url: "y".to_string(),
                name_of_worker: "Sam".to_string(),
            },
        )
        .await
        .unwrap();

        let all = list_workers(workers.as_ref()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].get_str("nameOfWorker").unwrap(), "Sam");
    }

    #[tokio::test]
    async fn profile_insert_returns_a_generated_id() {
        let store = MemoryBackend::store();
        let workers = store.collection(WORKERS_COLLECTION);

        let id = add_worker_profile(workers.as_ref(), &plumber("Jo"))
            .await
            .unwrap();
        assert!(matches!(id, Bson::ObjectId(_)));
    }
}
