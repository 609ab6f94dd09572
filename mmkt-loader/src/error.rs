//! Error types for the loading pipeline.

use thiserror::Error;

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can terminate a load.
///
/// A load either returns the fully populated result or exactly one of these;
/// partial results are never returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The store could not be reached, timed out, or is locked.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Offset, limit or sort rejected before any query ran.
    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),

    /// A filter named a field the root does not expose, or gave a value
    /// its column cannot hold.
    #[error("invalid criteria: {0}")]
    InvalidCriteria(String),

    /// A bag row referenced a root that was not loaded.
    #[error("bag '{bag}' returned a row for unknown root {root_id}")]
    ReconciliationMismatch { bag: &'static str, root_id: String },

    /// The store rejected a statement, e.g. a missing table or an
    /// incompatible schema.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored row could not be decoded.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<mmkt_types::Error> for LoadError {
    fn from(err: mmkt_types::Error) -> Self {
        match err {
            mmkt_types::Error::InvalidPageRequest(msg) => Self::InvalidPageRequest(msg),
            mmkt_types::Error::InvalidSort(msg) => Self::InvalidPageRequest(msg),
        }
    }
}
