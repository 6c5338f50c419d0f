//! Async link store
//!
//! Every operation first awaits the one-time open. Calls made while the
//! database is still opening wait on the same gate; if the open failed, they
//! all fail with [`LinkStoreError::Open`]. The SQLite work itself runs on the
//! blocking pool.

use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::path::PathBuf;
use std::sync::Arc;

use crate::database::Database;
use crate::error::{LinkStoreError, StorageError};
use crate::link::SharedLink;

/// Page size used by [`LinkStore::get_all`] when no maximum is given.
pub const DEFAULT_MAXIMUM: usize = 10;

type OpenGate = Shared<BoxFuture<'static, Result<Database, Arc<StorageError>>>>;

/// Where the named database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

#[derive(Clone)]
pub struct LinkStore {
    ready: OpenGate,
}

impl LinkStore {
    /// Start opening the database at `version`.
    ///
    /// Returns immediately; the open runs in the background on the current
    /// Tokio runtime. Without one the open fails, and so does every
    /// operation on the returned store.
    pub fn open(location: StoreLocation, version: u32) -> Self {
        let task = tokio::runtime::Handle::try_current().map(|handle| {
            handle.spawn_blocking(move || match &location {
                StoreLocation::File(path) => Database::open(path, version),
                StoreLocation::Memory => Database::open_in_memory(version),
            })
        });

        let ready = async move {
            let result = match task {
                Ok(task) => match task.await {
                    Ok(result) => result,
                    Err(e) => Err(StorageError::Task(e.to_string())),
                },
                Err(e) => Err(StorageError::Runtime(e.to_string())),
            };

            match result {
                Ok(db) => {
                    tracing::info!(version, "Opened link database");
                    Ok(db)
                }
                Err(e) => {
                    tracing::error!(error = %e, version, "Failed to open link database");
                    Err(Arc::new(e))
                }
            }
        }
        .boxed()
        .shared();

        Self { ready }
    }

    pub fn open_path(path: impl Into<PathBuf>, version: u32) -> Self {
        Self::open(StoreLocation::File(path.into()), version)
    }

    pub fn open_in_memory(version: u32) -> Self {
        Self::open(StoreLocation::Memory, version)
    }

    /// Wait for the open to finish.
    pub async fn ready(&self) -> Result<(), LinkStoreError> {
        self.database().await.map(|_| ())
    }

    async fn database(&self) -> Result<Database, LinkStoreError> {
        self.ready.clone().await.map_err(LinkStoreError::Open)
    }

    /// Insert records without an `id`, overwrite records with one.
    ///
    /// The whole batch is one transaction: it resolves with the ids in input
    /// order once every record is committed, or fails without writing any.
    pub async fn put(
        &self,
        links: impl Into<Vec<SharedLink>>,
    ) -> Result<Vec<i64>, LinkStoreError> {
        let links = links.into();
        let db = self.database().await?;

        if links.is_empty() {
            return Ok(Vec::new());
        }

        let ids = blocking(move || db.put_links(&links))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to save links");
                LinkStoreError::Save(Arc::new(e))
            })?;

        tracing::debug!(count = ids.len(), "Saved links");
        Ok(ids)
    }

    pub async fn get(&self, id: i64) -> Result<Option<SharedLink>, LinkStoreError> {
        let db = self.database().await?;
        blocking(move || db.get_link(id))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, link_id = id, "Failed to get link");
                LinkStoreError::GetRecord(Arc::new(e))
            })
    }

    /// Up to `maximum` links, highest `id` first. `None` or `Some(0)` means
    /// [`DEFAULT_MAXIMUM`].
    pub async fn get_all(
        &self,
        maximum: Option<usize>,
    ) -> Result<Vec<SharedLink>, LinkStoreError> {
        let limit = match maximum {
            None | Some(0) => DEFAULT_MAXIMUM,
            Some(n) => n,
        };

        let db = self.database().await?;
        blocking(move || db.recent_links(limit))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to get links");
                LinkStoreError::GetRecords(Arc::new(e))
            })
    }

    /// The most recent link, if any.
    pub async fn pop(&self) -> Result<Vec<SharedLink>, LinkStoreError> {
        self.get_all(Some(1)).await
    }

    /// Deleting an id that is not stored succeeds without effect.
    pub async fn delete(&self, id: i64) -> Result<(), LinkStoreError> {
        let db = self.database().await?;
        let removed = blocking(move || db.delete_link(id))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, link_id = id, "Failed to delete link");
                LinkStoreError::Delete(Arc::new(e))
            })?;

        tracing::debug!(link_id = id, removed, "Deleted link");
        Ok(())
    }
}

async fn blocking<F, T>(work: F) -> Result<T, StorageError>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::runtime::Handle::try_current()
        .map_err(|e| StorageError::Runtime(e.to_string()))?;

    handle
        .spawn_blocking(work)
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
}
