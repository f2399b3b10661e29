use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::dispatcher::report::PlanStats;
use crate::model::{IndexGroup, InstalledItemRef, ItemIdentity, ResolvedItem};
use crate::traits::{IndexingEngine, ItemRepository};

pub struct GroupingPlan {
    pub groups: Vec<IndexGroup>,
    pub stats: PlanStats,
}

/// Partitions installed refs into per-index groups.
///
/// Refs from unconfigured databases, refs that no longer resolve and items
/// routed to no index are dropped. Every installed version is kept as its own
/// entry; only refs repeating the same database, item and version collapse.
pub fn plan_groups(
    refs: &[InstalledItemRef],
    repository: &dyn ItemRepository,
    engine: &dyn IndexingEngine,
) -> GroupingPlan {
    let mut stats = PlanStats {
        requested: refs.len(),
        ..PlanStats::default()
    };
    if refs.is_empty() {
        return GroupingPlan {
            groups: Vec::new(),
            stats,
        };
    }

    let databases = repository.configured_database_names();
    let mut seen: HashSet<ItemIdentity> = HashSet::new();
    let mut by_index: IndexMap<String, Vec<ResolvedItem>> = IndexMap::new();

    for item_ref in refs {
        if !databases.contains(&item_ref.database) {
            debug!(
                "skipping {}:{}, database is not configured",
                item_ref.database, item_ref.item_id
            );
            stats.unconfigured_database += 1;
            continue;
        }

        if !seen.insert(ItemIdentity::from(item_ref)) {
            stats.duplicates += 1;
            continue;
        }

        let resolved =
            repository.resolve(&item_ref.database, &item_ref.item_id, item_ref.version);
        let item = match resolved {
            Ok(Some(item)) => item,
            Ok(None) => {
                debug!(
                    "skipping {}:{}#{}, item version not found",
                    item_ref.database, item_ref.item_id, item_ref.version
                );
                stats.unresolved += 1;
                continue;
            }
            Err(e) => {
                debug!(
                    "skipping {}:{}#{}, resolution failed: {}",
                    item_ref.database, item_ref.item_id, item_ref.version, e
                );
                stats.unresolved += 1;
                continue;
            }
        };

        match engine.route_to_index(&item) {
            Some(index_name) if !index_name.is_empty() => {
                by_index.entry(index_name).or_default().push(item);
            }
            _ => {
                debug!("skipping {}, item is excluded from indexing", item.identity);
                stats.excluded += 1;
            }
        }
    }

    let groups = by_index
        .into_iter()
        .map(|(index_name, items)| IndexGroup { index_name, items })
        .collect();

    GroupingPlan { groups, stats }
}
