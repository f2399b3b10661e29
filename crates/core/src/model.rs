use std::fmt;

use serde::{Deserialize, Serialize};

/// One item written by the installer, as named in the install event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledItemRef {
    pub database: String,
    pub item_id: String,
    pub version: u32,
}

impl InstalledItemRef {
    pub fn new(database: impl Into<String>, item_id: impl Into<String>, version: u32) -> Self {
        Self {
            database: database.into(),
            item_id: item_id.into(),
            version,
        }
    }
}

/// Stable identity handed to the indexing engine for a forced update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemIdentity {
    pub database: String,
    pub item_id: String,
    pub version: u32,
}

impl ItemIdentity {
    pub fn new(database: impl Into<String>, item_id: impl Into<String>, version: u32) -> Self {
        Self {
            database: database.into(),
            item_id: item_id.into(),
            version,
        }
    }
}

impl From<&InstalledItemRef> for ItemIdentity {
    fn from(value: &InstalledItemRef) -> Self {
        Self {
            database: value.database.clone(),
            item_id: value.item_id.clone(),
            version: value.version,
        }
    }
}

impl fmt::Display for ItemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.database, self.item_id, self.version)
    }
}

/// Live snapshot of an item as the repository currently holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedItem {
    pub identity: ItemIdentity,
    pub path: String,
    pub template: String,
}

/// Handle to a named index, as returned by the indexing engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexHandle {
    pub name: String,
}

impl IndexHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Items routed to the same index, in the order they were encountered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGroup {
    pub index_name: String,
    pub items: Vec<ResolvedItem>,
}

impl IndexGroup {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn identities(&self) -> Vec<ItemIdentity> {
        self.items.iter().map(|item| item.identity.clone()).collect()
    }
}
