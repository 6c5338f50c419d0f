//! WebShare Core
//!
//! Link collection, list view and application state for the link-sharing
//! widget. The store owns persisted links; everything held here is a cache
//! derived from it.

mod app;
mod collection;
mod config;
mod error;
mod html;
mod model;
mod view;

pub use app::WebShare;
pub use collection::{CollectionEvent, CollectionObserver, LinkCollection};
pub use config::Config;
pub use error::CoreError;
pub use html::HtmlListSurface;
pub use model::LinkModel;
pub use view::{ListSurface, ListView, RenderMode};

// Re-export lower layers
pub use webshare_storage::{LinkStore, LinkStoreError, SharedLink, StorageError, StoreLocation};
pub use webshare_sync::{Method, SyncBridge, SyncError, SyncOptions, SyncResponse, SyncTarget};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
