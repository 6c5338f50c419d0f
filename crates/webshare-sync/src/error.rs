//! Sync error types

use thiserror::Error;

use crate::bridge::Method;

#[derive(Error, Debug, Clone)]
pub enum SyncError {
    #[error("Store error: {0}")]
    Store(#[from] webshare_storage::LinkStoreError),

    #[error("Cannot {0} a collection")]
    UnsupportedTarget(Method),

    #[error("Cannot {0} a link without an id")]
    MissingId(Method),
}
