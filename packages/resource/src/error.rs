use thiserror::Error;
use uuid::Uuid;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("stored file not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ResourceError {
    /// True when the save lost an optimistic-concurrency race and may be
    /// retried after reloading.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Repository(RepositoryError::VersionConflict { .. })
        )
    }
}
