mod audit;
mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::entity::Entity;

pub use audit::{Auditor, FixedAuditor};
pub use memory::{DocumentRepository, MemoryDocumentStore};

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The record changed (or appeared, or vanished) since the caller read it.
    #[error("version conflict on {collection}/{id}: expected {expected:?}, stored {actual:?}")]
    VersionConflict {
        collection: &'static str,
        id: Uuid,
        expected: Option<u64>,
        actual: Option<u64>,
    },

    #[error("document mapping failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence for one entity type.
///
/// `save` stamps audit fields and advances the version; it fails with
/// [`RepositoryError::VersionConflict`] when the caller's copy is stale.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<E>, RepositoryError>;

    async fn save(&self, entity: E) -> Result<E, RepositoryError>;

    /// Physically remove a record.
    ///
    /// Returns `true` if the record was removed, `false` if it did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}
