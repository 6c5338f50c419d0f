//! Intent dispatch

use std::fmt;

use webshare_storage::{LinkStore, SharedLink};

use crate::error::SyncError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Read => write!(f, "read"),
            Method::Create => write!(f, "create"),
            Method::Update => write!(f, "update"),
            Method::Delete => write!(f, "delete"),
        }
    }
}

/// What an intent is issued against: the whole collection, or one model's
/// serialized state.
#[derive(Debug, Clone, Copy)]
pub enum SyncTarget<'a> {
    Collection,
    Model(&'a SharedLink),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncResponse {
    /// Collection read, most recent first.
    Records(Vec<SharedLink>),
    /// Model read; `None` when the id is not stored.
    Record(Option<SharedLink>),
    /// Create or update; the link as persisted, `id` included.
    Saved(SharedLink),
    Deleted,
}

type SuccessCallback = Box<dyn FnOnce(SyncResponse) + Send>;
type ErrorCallback = Box<dyn FnOnce(SyncError) + Send>;

/// Callback form of a sync call. Consumed by [`SyncBridge::sync`], which
/// invokes exactly one of the two callbacks exactly once if driven to completion.
pub struct SyncOptions {
    pub maximum: Option<usize>,
    success: SuccessCallback,
    error: ErrorCallback,
}

impl SyncOptions {
    pub fn new<S, E>(success: S, error: E) -> Self
    where
        S: FnOnce(SyncResponse) + Send + 'static,
        E: FnOnce(SyncError) + Send + 'static,
    {
        Self {
            maximum: None,
            success: Box::new(success),
            error: Box::new(error),
        }
    }

    pub fn with_maximum(mut self, maximum: usize) -> Self {
        self.maximum = Some(maximum);
        self
    }
}

impl fmt::Debug for SyncOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOptions")
            .field("maximum", &self.maximum)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct SyncBridge {
    store: LinkStore,
}

impl SyncBridge {
    pub fn new(store: LinkStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &LinkStore {
        &self.store
    }

    /// Run one intent against the store.
    pub async fn dispatch(
        &self,
        method: Method,
        target: SyncTarget<'_>,
        maximum: Option<usize>,
    ) -> Result<SyncResponse> {
        tracing::debug!(%method, ?target, "Dispatching sync");

        match (method, target) {
            (Method::Read, SyncTarget::Collection) => {
                let links = self.store.get_all(maximum).await?;
                Ok(SyncResponse::Records(links))
            }
            (Method::Read, SyncTarget::Model(link)) => {
                let id = link.id.ok_or(SyncError::MissingId(method))?;
                Ok(SyncResponse::Record(self.store.get(id).await?))
            }
            (Method::Create | Method::Update, SyncTarget::Model(link)) => {
                let ids = self.store.put(link.clone()).await?;
                let mut saved = link.clone();
                saved.id = ids.first().copied().or(link.id);
                Ok(SyncResponse::Saved(saved))
            }
            (Method::Delete, SyncTarget::Model(link)) => {
                let id = link.id.ok_or(SyncError::MissingId(method))?;
                self.store.delete(id).await?;
                Ok(SyncResponse::Deleted)
            }
            (Method::Create | Method::Update | Method::Delete, SyncTarget::Collection) => {
                Err(SyncError::UnsupportedTarget(method))
            }
        }
    }

    /// Callback form of [`dispatch`](Self::dispatch).
    ///
    /// Exactly one of the two callbacks runs, once, when the returned future
    /// completes. Dropping the future before it completes runs neither.
    pub async fn sync(&self, method: Method, target: SyncTarget<'_>, options: SyncOptions) {
        let SyncOptions {
            maximum,
            success,
            error,
        } = options;

        match self.dispatch(method, target, maximum).await {
            Ok(response) => success(response),
            Err(e) => {
                tracing::warn!(%method, error = %e, "Sync failed");
                error(e)
            }
        }
    }
}
