//! WebShare Storage Layer
//!
//! SQLite-based persistence for shared links. One table, one
//! auto-incrementing `id`, and a schema version whose bump drops and
//! recreates the table.

mod database;
mod error;
mod link;
mod migrations;
mod store;

pub use database::Database;
pub use error::{LinkStoreError, StorageError};
pub use link::SharedLink;
pub use migrations::SCHEMA_VERSION;
pub use store::{LinkStore, StoreLocation, DEFAULT_MAXIMUM};

pub type Result<T> = std::result::Result<T, StorageError>;
