//! MongoDB-backed store.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::{options::ClientOptions, Client, Database};
use tokio::time::timeout;

use crate::{Backend, Collection, Store, StoreError};

/// Backend wrapping a live MongoDB database.
pub struct MongoBackend {
    db: Database,
}

/// Establish a client, verify reachability with a ping, and wrap the named
/// database in a [`Store`]. An unreachable store here is fatal to startup;
/// once connected, per-request failures are surfaced through [`StoreError`]
/// and the process keeps serving.
pub async fn connect(uri: &str, database: &str) -> anyhow::Result<Store> {
    let options = ClientOptions::parse(uri)
        .await
        .with_context(|| "invalid document store endpoint")?;
    let client = Client::with_options(options)?;
    let db = client.database(database);

    db.run_command(doc! { "ping": 1 })
        .await
        .with_context(|| "document store unreachable")?;

    tracing::info!(database, "connected to document store");
    Ok(Store::new(Arc::new(MongoBackend { db })))
}

impl Backend for MongoBackend {
    fn collection(&self, name: &str) -> Arc<dyn Collection> {
        Arc::new(MongoCollection {
            inner: self.db.collection::<Document>(name),
        })
    }
}

struct MongoCollection {
    inner: mongodb::Collection<Document>,
}

fn driver(err: mongodb::error::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl Collection for MongoCollection {
    async fn insert_one(
        &self,
        document: Document,
        deadline: Duration,
    ) -> Result<Bson, StoreError> {
        let result = timeout(deadline, self.inner.insert_one(document))
            .await
            .map_err(|_| StoreError::DeadlineExceeded(deadline))?
            .map_err(driver)?;
        Ok(result.inserted_id)
    }

    async fn find(
        &self,
        filter: Document,
        deadline: Duration,
    ) -> Result<Vec<Document>, StoreError> {
        // The deadline covers cursor creation and materialization together.
        let fetch = async {
            let cursor = self.inner.find(filter).await?;
            cursor.try_collect::<Vec<Document>>().await
        };
        timeout(deadline, fetch)
            .await
            .map_err(|_| StoreError::DeadlineExceeded(deadline))?
            .map_err(driver)
    }

    async fn delete_many(
        &self,
        filter: Document,
        deadline: Duration,
    ) -> Result<u64, StoreError> {
        let result = timeout(deadline, self.inner.delete_many(filter))
            .await
            .map_err(|_| StoreError::DeadlineExceeded(deadline))?
            .map_err(driver)?;
        Ok(result.deleted_count)
    }
}
