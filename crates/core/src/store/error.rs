//! Record store errors.

use thiserror::Error;
use uuid::Uuid;

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by a record store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No row with this ID in the collection.
    #[error("{collection}: record {id} not found")]
    NotFound {
        /// Collection name.
        collection: &'static str,
        /// Missing ID.
        id: Uuid,
    },

    /// A uniqueness constraint was violated.
    #[error("{collection}: {message}")]
    Conflict {
        /// Collection name.
        collection: &'static str,
        /// Backend message.
        message: String,
    },

    /// The store could not be reached.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("record store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(collection: &'static str, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }

    /// Returns true if the error is a missing record.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
