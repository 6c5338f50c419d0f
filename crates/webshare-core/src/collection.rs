//! Link collection
//!
//! In-memory cache of links with add/reset notifications. Observers are held
//! weakly and notified after the cache lock is released.

use parking_lot::RwLock;
use std::sync::{Arc, Weak};

use webshare_storage::SharedLink;
use webshare_sync::{Method, SyncBridge, SyncResponse, SyncTarget};

use crate::error::CoreError;
use crate::model::LinkModel;
use crate::Result;

#[derive(Debug, Clone, Copy)]
pub enum CollectionEvent<'a> {
    /// The cache was replaced wholesale.
    Reset(&'a [SharedLink]),
    /// One persisted link was appended.
    Add(&'a SharedLink),
}

pub trait CollectionObserver: Send + Sync {
    fn notify(&self, event: CollectionEvent<'_>);
}

pub struct LinkCollection {
    bridge: SyncBridge,
    models: RwLock<Vec<SharedLink>>,
    observers: RwLock<Vec<Weak<dyn CollectionObserver>>>,
}

impl LinkCollection {
    pub fn new(bridge: SyncBridge) -> Self {
        Self {
            bridge,
            models: RwLock::new(Vec::new()),
            observers: RwLock::new(Vec::new()),
        }
    }

    pub fn subscribe<O>(&self, observer: &Arc<O>)
    where
        O: CollectionObserver + 'static,
    {
        let weak: Weak<O> = Arc::downgrade(observer);
        self.observers.write().push(weak);
    }

    /// Replace the cache with the most recent `maximum` stored links.
    pub async fn fetch(&self, maximum: Option<usize>) -> Result<usize> {
        let links = match self
            .bridge
            .dispatch(Method::Read, SyncTarget::Collection, maximum)
            .await?
        {
            SyncResponse::Records(links) => links,
            _ => return Err(CoreError::UnexpectedResponse(Method::Read)),
        };

        *self.models.write() = links.clone();

        tracing::debug!(count = links.len(), "Reset link collection");
        self.emit(CollectionEvent::Reset(&links));

        Ok(links.len())
    }

    /// Persist `link`, then append it to the cache.
    ///
    /// The `Add` notification carries the stored link, id included. Nothing
    /// is added if the save fails.
    pub async fn create(&self, link: SharedLink) -> Result<SharedLink> {
        let mut model = LinkModel::from(link);
        model.save(&self.bridge).await?;
        let link = model.into_link();

        self.models.write().push(link.clone());

        tracing::info!(link_id = ?link.id, url = %link.url, "Created link");
        self.emit(CollectionEvent::Add(&link));

        Ok(link)
    }

    /// Delete a stored link and drop it from the cache.
    ///
    /// A cached link is destroyed through its model; an id outside the cache
    /// is deleted from the store directly.
    pub async fn remove(&self, id: i64) -> Result<()> {
        match self.get(id) {
            Some(link) => LinkModel::from(link).destroy(&self.bridge).await?,
            None => self.bridge.store().delete(id).await?,
        }

        self.models.write().retain(|link| link.id != Some(id));
        tracing::info!(link_id = id, "Removed link");

        Ok(())
    }

    pub fn models(&self) -> Vec<SharedLink> {
        self.models.read().clone()
    }

    pub fn get(&self, id: i64) -> Option<SharedLink> {
        self.models
            .read()
            .iter()
            .find(|link| link.id == Some(id))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }

    pub fn bridge(&self) -> &SyncBridge {
        &self.bridge
    }

    fn emit(&self, event: CollectionEvent<'_>) {
        let live: Vec<Arc<dyn CollectionObserver>> = {
            let mut observers = self.observers.write();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };

        for observer in live {
            observer.notify(event);
        }
    }
}
