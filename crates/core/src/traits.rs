use std::collections::HashSet;
use std::sync::Arc;

use installsync_jobs::DynReindexJob;

use crate::error::Result;
use crate::model::{IndexHandle, ItemIdentity, ResolvedItem};

/// Read access to the host's content repository.
pub trait ItemRepository: Send + Sync {
    /// Databases the host currently has configured. Items from any other
    /// database are never reconciled.
    fn configured_database_names(&self) -> HashSet<String>;

    /// Resolves one version of an item. The returned item carries that same
    /// version in its identity. `Ok(None)` when the item or version no longer
    /// exists, e.g. it was deleted after the install finished.
    fn resolve(
        &self,
        database: &str,
        item_id: &str,
        version: u32,
    ) -> Result<Option<ResolvedItem>>;
}

/// The host's search indexing subsystem.
pub trait IndexingEngine: Send + Sync {
    /// Name of the index responsible for `item`. `None` or an empty name means
    /// the item is excluded from indexing.
    fn route_to_index(&self, item: &ResolvedItem) -> Option<String>;

    fn get_index(&self, name: &str) -> Result<IndexHandle>;

    /// Starts an incremental update of `items` that runs even when the
    /// engine's change tracking considers them current.
    fn submit_forced_incremental_update(
        &self,
        index: &IndexHandle,
        items: Vec<ItemIdentity>,
    ) -> Result<DynReindexJob>;

    fn suspend(&self) -> Result<()>;

    fn resume(&self) -> Result<()>;
}

pub type DynItemRepository = Arc<dyn ItemRepository + Send + Sync>;
pub type DynIndexingEngine = Arc<dyn IndexingEngine + Send + Sync>;
