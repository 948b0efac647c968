//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Failures of the blog resource service.
///
/// The HTTP layer maps every variant to the same redirect, so this type is
/// what keeps the three failure kinds apart for logging and tests.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Post not found: {id}")]
    NotFound { id: Uuid },

    #[error("Malformed post id: {0:?}")]
    InvalidId(String),

    #[error("Store failure: {0}")]
    Store(#[source] RepoError),
}

impl BlogError {
    /// Stable label used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            BlogError::NotFound { .. } => "not_found",
            BlogError::InvalidId(_) => "invalid_id",
            BlogError::Store(_) => "store",
        }
    }

    /// Wrap a repository error, lifting `RepoError::NotFound` to the typed variant.
    pub fn from_repo(id: Uuid, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => BlogError::NotFound { id },
            other => BlogError::Store(other),
        }
    }
}

impl From<RepoError> for BlogError {
    fn from(err: RepoError) -> Self {
        BlogError::Store(err)
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,
}
