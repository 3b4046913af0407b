//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id={id} not found")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("No results: {0}")]
    NoResults(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] RepoError),
}

impl DomainError {
    pub fn post_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "post",
            id: id.into(),
        }
    }
}

/// Errors raised by post map adapters.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Storage connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Record (de)serialization failed: {0}")]
    Serialization(String),
}
