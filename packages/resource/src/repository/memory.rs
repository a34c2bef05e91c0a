use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use common::entity::AuditStamp;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{Auditor, Repository, RepositoryError};
use crate::entity::Entity;

type Collection = HashMap<Uuid, Value>;

/// In-process document store: collection name -> id -> JSON document.
///
/// Documents carry the same field names an external document database would.
/// One store is shared by the repositories of every entity type.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<&'static str, Collection>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored document, as written by the last successful save.
    pub async fn document(&self, collection: &str, id: Uuid) -> Option<Value> {
        self.collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.get(&id))
            .cloned()
    }

    /// Number of documents in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, HashMap::len)
    }
}

fn stored_version(doc: &Value) -> Option<u64> {
    doc.get("version").and_then(Value::as_u64)
}

/// [`Repository`] over a [`MemoryDocumentStore`] collection.
pub struct DocumentRepository<E> {
    store: Arc<MemoryDocumentStore>,
    auditor: Arc<dyn Auditor>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> DocumentRepository<E> {
    pub fn new(store: Arc<MemoryDocumentStore>, auditor: Arc<dyn Auditor>) -> Self {
        Self {
            store,
            auditor,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for DocumentRepository<E> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, RepositoryError> {
        match self.store.document(E::COLLECTION, id).await {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        let collections = self.store.collections.read().await;
        let Some(docs) = collections.get(E::COLLECTION) else {
            return Ok(Vec::new());
        };
        docs.values()
            .map(|doc| serde_json::from_value(doc.clone()).map_err(RepositoryError::from))
            .collect()
    }

    async fn save(&self, mut entity: E) -> Result<E, RepositoryError> {
        let id = entity.id();
        // Version check and write happen under one guard.
        let mut collections = self.store.collections.write().await;
        let docs = collections.entry(E::COLLECTION).or_default();

        let stored = docs.get(&id).map(stored_version);
        let expected = entity.meta().version;
        let actual = stored.flatten();
        if expected != actual {
            warn!(
                collection = E::COLLECTION,
                %id,
                ?expected,
                ?actual,
                "Rejected save of stale record"
            );
            return Err(RepositoryError::VersionConflict {
                collection: E::COLLECTION,
                id,
                expected,
                actual,
            });
        }

        let insert = stored.is_none();
        let stamp = AuditStamp::new(self.auditor.current_auditor(), insert);
        entity.meta_mut().stamp(&stamp);

        let doc = serde_json::to_value(&entity)?;
        docs.insert(id, doc);
        entity.meta_mut().mark_persisted();

        debug!(
            collection = E::COLLECTION,
            %id,
            version = ?entity.meta().version,
            insert,
            "Saved document"
        );
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut collections = self.store.collections.write().await;
        let removed = collections
            .get_mut(E::COLLECTION)
            .and_then(|docs| docs.remove(&id))
            .is_some();
        if removed {
            debug!(collection = E::COLLECTION, %id, "Removed document");
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.store.len(E::COLLECTION).await as u64)
    }
}
