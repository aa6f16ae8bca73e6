use crate::types::DbId;

/// Domain error taxonomy shared by all duet crates.
///
/// `Conflict` is raised when a duplicate creation is detected mid-operation;
/// the match ledger resolves it internally by re-reading the winning row, so
/// callers of the HTTP API only ever see it for genuinely conflicting input
/// (e.g. a taken username). Store unavailability is not modelled here -- it
/// travels as `sqlx::Error` and is classified at the API boundary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
