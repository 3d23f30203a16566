use encore_core::error::CoreError;
use encore_core::types::DbId;

/// Error type for queue-bearing repository operations.
///
/// Domain failures (admission rejections, illegal transitions, missing
/// entities) are [`CoreError`]; everything else is a storage failure from
/// sqlx, which is transient and safe to retry with backoff. Transactional
/// operations never partially apply: a storage error rolls back the whole
/// unit of work.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl QueueError {
    /// Shorthand for the `NotFound` domain error.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        QueueError::Domain(CoreError::NotFound { entity, id })
    }
}
