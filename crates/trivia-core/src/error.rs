//! Engine error types.

use thiserror::Error;

/// Errors reported by a [`QuestionStore`](crate::store::QuestionStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique value (e.g. a category label) already exists.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Any other backend failure (connectivity, constraints, I/O).
    #[error("store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Errors that can occur in engine operations.
///
/// Every operation either succeeds or fails with exactly one of these.
#[derive(Debug, Error)]
pub enum TriviaError {
    /// Malformed or missing required input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Well-formed input that cannot be processed.
    #[error("unprocessable: {0}")]
    Unprocessable(String),

    /// Referenced resource or page does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A unique resource already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Storage fault, never one of the domain kinds above.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, TriviaError>;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
