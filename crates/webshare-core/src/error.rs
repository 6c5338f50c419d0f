//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] webshare_storage::LinkStoreError),

    #[error("Sync error: {0}")]
    Sync(#[from] webshare_sync::SyncError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected response to {0}")]
    UnexpectedResponse(webshare_sync::Method),
}
