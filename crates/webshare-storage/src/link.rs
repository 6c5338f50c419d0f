//! Shared link record

use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A user-submitted `{url, label}` pair.
///
/// `id` is `None` until the store assigns one on first insert and never
/// changes afterwards. Neither `url` nor `label` is validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub url: String,
    pub label: String,
}

impl SharedLink {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: None,
            url: url.into(),
            label: label.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            url: row.get(1)?,
            label: row.get(2)?,
        })
    }
}

impl From<SharedLink> for Vec<SharedLink> {
    fn from(link: SharedLink) -> Self {
        vec![link]
    }
}
