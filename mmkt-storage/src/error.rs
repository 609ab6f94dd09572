//! Error types for the storage layer.

use mmkt_loader::LoadError;
use rusqlite::ErrorCode;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A previous holder of the connection panicked.
    #[error("connection lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    /// Whether the store itself is unreachable: busy, locked, unopenable or
    /// failing I/O. A retry may succeed.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Database(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::CannotOpen
                    | ErrorCode::SystemIoFailure
                    | ErrorCode::DiskFull
                    | ErrorCode::FileLockingProtocolFailed
            ),
            Self::Database(_) | Self::Migration(_) => false,
            Self::Io(_) | Self::LockPoisoned => true,
        }
    }

    /// Whether a stored row could not be decoded into its entity.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::Database(
                rusqlite::Error::FromSqlConversionFailure(..)
                    | rusqlite::Error::InvalidColumnType(..)
                    | rusqlite::Error::IntegralValueOutOfRange(..)
                    | rusqlite::Error::Utf8Error(_)
            )
        )
    }
}

impl From<StorageError> for LoadError {
    fn from(err: StorageError) -> Self {
        if err.is_unavailable() {
            LoadError::StorageUnavailable(err.to_string())
        } else if err.is_decode_error() {
            LoadError::InvalidData(err.to_string())
        } else {
            LoadError::Storage(err.to_string())
        }
    }
}
