use crate::types::EntityId;

/// Domain-level error taxonomy shared by the persistence and HTTP layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A record addressed by ID does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: EntityId },

    /// A relation lookup resolved to no records at all (for example an
    /// empty connect set, or a single relation that is not set).
    #[error("No matching {entity} records found")]
    NotFoundMany { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias for fallible domain operations.
pub type CoreResult<T> = Result<T, CoreError>;
