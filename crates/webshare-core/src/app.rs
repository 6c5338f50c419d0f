//! Application state container
//!
//! Builds the store once and hands it down explicitly: store → bridge →
//! collection → list view.

use serde::Deserialize;
use std::sync::Arc;

use webshare_storage::{LinkStore, SharedLink};
use webshare_sync::SyncBridge;

use crate::collection::LinkCollection;
use crate::config::Config;
use crate::view::{ListSurface, ListView};
use crate::Result;

/// Raw creation-form input.
#[derive(Debug, Deserialize)]
struct LinkForm {
    url: String,
    label: String,
}

pub struct WebShare {
    config: Config,
    store: LinkStore,
    bridge: SyncBridge,
    list_view: Arc<ListView>,
}

impl WebShare {
    /// Open the store and mount the list view onto `surface`.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn start(config: Config, surface: Arc<dyn ListSurface>) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let store = LinkStore::open_path(&config.database_path, config.schema_version);
        Self::with_store(config, store, surface).await
    }

    /// Mount onto an already opened store.
    pub async fn with_store(
        config: Config,
        store: LinkStore,
        surface: Arc<dyn ListSurface>,
    ) -> Result<Self> {
        let bridge = SyncBridge::new(store.clone());
        let collection = Arc::new(LinkCollection::new(bridge.clone()));
        let list_view = ListView::mount(collection, surface, config.list_maximum).await?;

        tracing::info!(
            database = %config.database_path.display(),
            schema_version = config.schema_version,
            "WebShare started"
        );

        Ok(Self {
            config,
            store,
            bridge,
            list_view,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &LinkStore {
        &self.store
    }

    pub fn bridge(&self) -> &SyncBridge {
        &self.bridge
    }

    pub fn collection(&self) -> &Arc<LinkCollection> {
        self.list_view.collection()
    }

    pub fn list_view(&self) -> &Arc<ListView> {
        &self.list_view
    }

    pub async fn create_web_share(
        &self,
        url: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<SharedLink> {
        self.list_view.add_to_collection(url, label).await
    }

    /// Create from a JSON form payload: `{"url": "..", "label": ".."}`.
    pub async fn create_from_json(&self, payload: &str) -> Result<SharedLink> {
        let form: LinkForm = serde_json::from_str(payload)?;
        tracing::debug!(url = %form.url, label = %form.label, "Received link form");
        self.create_web_share(form.url, form.label).await
    }

    pub async fn delete_web_share(&self, id: i64) -> Result<()> {
        self.collection().remove(id).await
    }
}
