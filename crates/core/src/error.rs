use crate::types::DbId;

/// Which admission limit was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitScope {
    /// The patron's own pending-request cap (`max_requests_per_patron`).
    Patron,
    /// The venue-wide pending cap (`queue_limit`).
    Queue,
}

impl LimitScope {
    pub fn as_str(self) -> &'static str {
        match self {
            LimitScope::Patron => "patron",
            LimitScope::Queue => "queue",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Limit exceeded: {} cap reached", scope.as_str())]
    LimitExceeded { scope: LimitScope },

    #[error("Duplicate request: track {track_id} already outstanding for this patron")]
    Duplicate { track_id: DbId },

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
