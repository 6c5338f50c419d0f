//! List view controller
//!
//! Two render modes: a full replace when the collection resets, and a single
//! append when one link is added. Previously rendered items are never
//! touched by an append.

use std::sync::Arc;

use webshare_storage::SharedLink;

use crate::collection::{CollectionEvent, CollectionObserver, LinkCollection};
use crate::Result;

#[derive(Debug, Clone, Copy)]
pub enum RenderMode<'a> {
    ReplaceAll(&'a [SharedLink]),
    AppendOne(&'a SharedLink),
}

/// Where rendered links end up.
pub trait ListSurface: Send + Sync {
    fn clear(&self);
    fn append(&self, link: &SharedLink);
}

pub struct ListView {
    collection: Arc<LinkCollection>,
    surface: Arc<dyn ListSurface>,
}

impl ListView {
    /// Subscribe to `collection` and load the `maximum` most recent links.
    pub async fn mount(
        collection: Arc<LinkCollection>,
        surface: Arc<dyn ListSurface>,
        maximum: usize,
    ) -> Result<Arc<Self>> {
        let view = Arc::new(Self {
            collection: Arc::clone(&collection),
            surface,
        });
        collection.subscribe(&view);

        let count = collection.fetch(Some(maximum)).await?;
        tracing::info!(count, maximum, "Mounted link list");

        Ok(view)
    }

    /// Store a new link. It is rendered when the collection reports the add.
    pub async fn add_to_collection(
        &self,
        url: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<SharedLink> {
        self.collection.create(SharedLink::new(url, label)).await
    }

    pub fn collection(&self) -> &Arc<LinkCollection> {
        &self.collection
    }

    pub fn render(&self, mode: RenderMode<'_>) {
        match mode {
            RenderMode::ReplaceAll(links) => {
                self.surface.clear();
                for link in links {
                    self.surface.append(link);
                }
            }
            RenderMode::AppendOne(link) => self.surface.append(link),
        }
    }
}

impl CollectionObserver for ListView {
    fn notify(&self, event: CollectionEvent<'_>) {
        match event {
            CollectionEvent::Reset(links) => self.render(RenderMode::ReplaceAll(links)),
            CollectionEvent::Add(link) => self.render(RenderMode::AppendOne(link)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use webshare_storage::{LinkStore, SCHEMA_VERSION};
    use webshare_sync::SyncBridge;

    #[derive(Default)]
    struct Recorder {
        rendered: Mutex<Vec<i64>>,
        clears: Mutex<usize>,
    }

    impl ListSurface for Recorder {
        fn clear(&self) {
            *self.clears.lock() += 1;
            self.rendered.lock().clear();
        }

        fn append(&self, link: &SharedLink) {
            self.rendered.lock().push(link.id.unwrap_or_default());
        }
    }

    async fn seeded_collection(count: usize) -> Arc<LinkCollection> {
        let store = LinkStore::open_in_memory(SCHEMA_VERSION);
        for i in 0..count {
            store
                .put(SharedLink::new(format!("https://{i}"), format!("{i}")))
                .await
                .unwrap();
        }
        Arc::new(LinkCollection::new(SyncBridge::new(store)))
    }

    #[tokio::test]
    async fn test_mount_renders_most_recent_first_then_appends() {
        let collection = seeded_collection(5).await;
        // Only the three most recent
        let recorder = Arc::new(Recorder::default());
        let view = ListView::mount(collection, recorder.clone(), 3)
            .await
            .unwrap();
        assert_eq!(*recorder.rendered.lock(), vec![5, 4, 3]);

        let added = view.add_to_collection("https://6", "6").await.unwrap();
        assert_eq!(added.id, Some(6));
        assert_eq!(*recorder.rendered.lock(), vec![5, 4, 3, 6]);
        assert_eq!(*recorder.clears.lock(), 1);
    }

    #[tokio::test]
    async fn test_refetch_replaces_rendered_list() {
        let collection = seeded_collection(2).await;
        let recorder = Arc::new(Recorder::default());
        let view = ListView::mount(Arc::clone(&collection), recorder.clone(), 50)
            .await
            .unwrap();
        view.add_to_collection("https://3", "3").await.unwrap();

        collection.fetch(Some(50)).await.unwrap();
        assert_eq!(*recorder.rendered.lock(), vec![3, 2, 1]);
        assert_eq!(*recorder.clears.lock(), 2);
    }

    #[tokio::test]
    async fn test_append_one_leaves_existing_items() {
        let recorder = Arc::new(Recorder::default());
        let view = ListView {
            collection: seeded_collection(0).await,
            surface: recorder.clone(),
        };

        let first = SharedLink::new("https://a", "a").with_id(1);
        let dup = first.clone();
        view.render(RenderMode::ReplaceAll(&[first]));
        view.render(RenderMode::AppendOne(&dup));

        // No dedupe on append
        assert_eq!(*recorder.rendered.lock(), vec![1, 1]);
    }
}
