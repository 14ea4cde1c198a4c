//! Error types for flag-cache operations.
//!
//! These errors only travel along the fallible [`Store`](crate::storage::Store)
//! seam and through the CLI. The [`Persistence`](crate::storage::Persistence)
//! contract absorbs them before they reach the SDK.

use thiserror::Error;

/// Result type alias for flag-cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Database backend errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Filesystem errors.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Errors raised by the SQLite backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Connection, statement preparation, or execution error.
    #[error("database error: {0}")]
    Database(String),

    /// The store failed to initialize and is inert.
    #[error("storage unavailable: initialization failed")]
    Unavailable,
}

/// Errors raised by the file backend.
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write a staging file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to move a staging file over its target.
    #[error("failed to rename into place: {path}: {reason}")]
    RenameFailed {
        /// Path to the target file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to read an entry file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to delete an entry file.
    #[error("failed to remove file: {path}: {reason}")]
    RemoveFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),

    /// No entry stored under the requested key.
    #[error("entry not found: {namespace}/{key}")]
    NotFound {
        /// Namespace that was looked up.
        namespace: String,
        /// Key that was looked up.
        key: String,
    },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}
