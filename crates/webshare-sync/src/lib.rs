//! WebShare Sync Bridge
//!
//! Maps the model layer's read / create / update / delete intents onto the
//! link store:
//! - collection `Read` → `get_all(maximum)`
//! - model `Read` → `get(id)`
//! - model `Create` / `Update` → `put(link)`
//! - model `Delete` → `delete(id)`

mod bridge;
mod error;

pub use bridge::{Method, SyncBridge, SyncOptions, SyncResponse, SyncTarget};
pub use error::SyncError;

pub type Result<T> = std::result::Result<T, SyncError>;
