//! Domain errors shared by the repositories and the HTTP layer.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A content row addressed by id does not exist (or is a hidden draft).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input rejected before reaching storage: blank fields, an unknown
    /// section or status, a refused upload.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing, invalid or expired admin session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed, e.g. a locked account.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
