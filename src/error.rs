//! Error types for carton-db
//!
//! Provides a unified error type for all store operations. Absence of a
//! record on a direct key lookup is reported through `Option`, never here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for RecordStore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Database is locked by another handle: {0}")]
    Locked(PathBuf),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Transaction error: {0}")]
    Transaction(#[source] redb::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("No file indexed under hash {0:?}")]
    NotFound(String),

    #[error("Hash {hash:?} is indexed to {name:?} but no such file record exists")]
    Inconsistent { hash: String, name: String },

    #[error("Hash {hash:?} already belongs to file {existing:?}")]
    HashConflict { hash: String, existing: String },

    // -------------------------------------------------------------------------
    // Artifact Errors
    // -------------------------------------------------------------------------
    #[error("File record removed but artifact {path:?} could not be deleted: {source}")]
    ArtifactRemoval {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<redb::DatabaseError> for StoreError {
    fn from(err: redb::DatabaseError) -> Self {
        match err {
            redb::DatabaseError::Storage(redb::StorageError::Io(e)) => StoreError::Io(e),
            other => StoreError::Transaction(other.into()),
        }
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(err: redb::TransactionError) -> Self {
        StoreError::Transaction(err.into())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(err: redb::TableError) -> Self {
        StoreError::Transaction(err.into())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(err: redb::StorageError) -> Self {
        StoreError::Transaction(err.into())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(err: redb::CommitError) -> Self {
        StoreError::Transaction(err.into())
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
