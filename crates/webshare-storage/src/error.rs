//! Storage error types

use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid schema version: {0}")]
    InvalidVersion(u32),

    #[error("Schema version {requested} is lower than stored version {stored}")]
    VersionDowngrade { requested: u32, stored: u32 },

    #[error("Storage task failed: {0}")]
    Task(String),

    #[error("No async runtime: {0}")]
    Runtime(String),
}

/// Failure of a [`LinkStore`](crate::LinkStore) operation.
///
/// The display strings are the coarse, user-facing tags; the underlying
/// [`StorageError`] stays reachable through `source()`.
#[derive(Error, Debug, Clone)]
pub enum LinkStoreError {
    #[error("unable to open database")]
    Open(#[source] Arc<StorageError>),

    #[error("unable to save")]
    Save(#[source] Arc<StorageError>),

    #[error("unable to get record")]
    GetRecord(#[source] Arc<StorageError>),

    #[error("unable to get records")]
    GetRecords(#[source] Arc<StorageError>),

    #[error("unable to delete record")]
    Delete(#[source] Arc<StorageError>),
}

impl LinkStoreError {
    /// The storage failure behind this error.
    pub fn cause(&self) -> &StorageError {
        match self {
            Self::Open(e)
            | Self::Save(e)
            | Self::GetRecord(e)
            | Self::GetRecords(e)
            | Self::Delete(e) => e,
        }
    }
}
