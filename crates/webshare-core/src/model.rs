//! Single link entity

use webshare_storage::SharedLink;
use webshare_sync::{Method, SyncBridge, SyncResponse, SyncTarget};

use crate::error::CoreError;
use crate::Result;

/// One link as the model layer sees it. Persisted through a [`SyncBridge`];
/// the stored row stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkModel {
    attributes: SharedLink,
}

impl LinkModel {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            attributes: SharedLink::new(url, label),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.attributes.id
    }

    pub fn attributes(&self) -> &SharedLink {
        &self.attributes
    }

    pub fn into_link(self) -> SharedLink {
        self.attributes
    }

    pub fn set(&mut self, url: impl Into<String>, label: impl Into<String>) {
        self.attributes.url = url.into();
        self.attributes.label = label.into();
    }

    /// Reload from the store. Returns `false` if the link is no longer stored.
    pub async fn fetch(&mut self, bridge: &SyncBridge) -> Result<bool> {
        match bridge
            .dispatch(Method::Read, SyncTarget::Model(&self.attributes), None)
            .await?
        {
            SyncResponse::Record(Some(link)) => {
                self.attributes = link;
                Ok(true)
            }
            SyncResponse::Record(None) => Ok(false),
            _ => Err(CoreError::UnexpectedResponse(Method::Read)),
        }
    }

    /// Create when new, update otherwise. Picks up the assigned id.
    pub async fn save(&mut self, bridge: &SyncBridge) -> Result<()> {
        let method = if self.attributes.is_new() {
            Method::Create
        } else {
            Method::Update
        };

        match bridge
            .dispatch(method, SyncTarget::Model(&self.attributes), None)
            .await?
        {
            SyncResponse::Saved(link) => {
                self.attributes = link;
                Ok(())
            }
            _ => Err(CoreError::UnexpectedResponse(method)),
        }
    }

    pub async fn destroy(self, bridge: &SyncBridge) -> Result<()> {
        bridge
            .dispatch(Method::Delete, SyncTarget::Model(&self.attributes), None)
            .await?;
        Ok(())
    }
}

impl From<SharedLink> for LinkModel {
    fn from(attributes: SharedLink) -> Self {
        Self { attributes }
    }
}
