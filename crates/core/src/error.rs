use crate::types::DbId;

/// Domain error taxonomy for the ledger.
///
/// Every failure a repository or handler reports maps onto one of these
/// kinds; the API layer turns the kind into an HTTP status. Messages are
/// user-facing, the kind is the stable contract.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Not-found for lookups keyed by display name instead of id
    /// (add-member by `userName`).
    #[error("Entity not found: {entity} with name {name}")]
    NameNotFound { entity: &'static str, name: String },

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
