use std::sync::Arc;

use installsync_jobs::{DynReindexJob, JobOutcome, WaitConfig, wait_all};
use tracing::{info, warn};

use crate::config::ReconcileConfig;
use crate::error::{InstallSyncError, Result};
use crate::model::{IndexGroup, InstalledItemRef};
use crate::traits::{DynIndexingEngine, DynItemRepository, IndexingEngine};

pub mod grouping;
pub mod report;

pub use grouping::{GroupingPlan, plan_groups};
pub use report::{PlanStats, ReconcileReport, SubmittedJob};

/// Re-indexes installed items, one forced incremental job per target index.
pub struct IndexUpdateDispatcher {
    repository: DynItemRepository,
    engine: DynIndexingEngine,
    wait: WaitConfig,
}

impl IndexUpdateDispatcher {
    pub fn new(
        repository: DynItemRepository,
        engine: DynIndexingEngine,
        config: &ReconcileConfig,
    ) -> Self {
        Self {
            repository,
            engine,
            wait: config.wait_config(),
        }
    }

    /// Groups `refs` by index, submits the jobs and returns once every job is
    /// done. Individual items and groups that cannot be processed are skipped.
    pub async fn reconcile_installed_items(
        &self,
        refs: Vec<InstalledItemRef>,
    ) -> Result<ReconcileReport> {
        info!("Updating '{}' items from installed items.", refs.len());
        if refs.is_empty() {
            return Ok(ReconcileReport::default());
        }

        // Repository and engine calls are synchronous, so planning and
        // submission both run on the blocking pool.
        let repository = Arc::clone(&self.repository);
        let engine = Arc::clone(&self.engine);
        let (mut report, jobs, submitted) = tokio::task::spawn_blocking(move || {
            let plan = plan_groups(&refs, repository.as_ref(), engine.as_ref());
            submit_groups(plan, engine.as_ref())
        })
        .await
        .map_err(|e| InstallSyncError::Internal(format!("submission task join failure: {e}")))?;

        let outcomes = wait_all(&jobs, &self.wait).await;
        for ((index_name, item_count), outcome) in submitted.into_iter().zip(outcomes) {
            if let JobOutcome::Failed(reason) = &outcome {
                warn!("[index={}] Update job finished with failure: {}", index_name, reason);
            }
            report.jobs.push(SubmittedJob {
                index_name,
                item_count,
                outcome,
            });
        }

        info!("Items from installed items have been indexed.");
        Ok(report)
    }
}

fn submit_groups(
    plan: GroupingPlan,
    engine: &dyn IndexingEngine,
) -> (ReconcileReport, Vec<DynReindexJob>, Vec<(String, usize)>) {
    let mut report = ReconcileReport {
        plan: plan.stats,
        ..ReconcileReport::default()
    };
    let mut jobs: Vec<DynReindexJob> = Vec::with_capacity(plan.groups.len());
    let mut submitted = Vec::with_capacity(plan.groups.len());

    for group in plan.groups {
        info!(
            "[index={}] Updating '{}' items from installed items.",
            group.index_name,
            group.len()
        );
        match submit(engine, &group) {
            Ok(job) => {
                jobs.push(job);
                submitted.push((group.index_name, group.items.len()));
            }
            Err(e) => {
                warn!("[index={}] Skipping installed items: {}", group.index_name, e);
                report.skipped_groups += 1;
            }
        }
    }

    (report, jobs, submitted)
}

fn submit(engine: &dyn IndexingEngine, group: &IndexGroup) -> Result<DynReindexJob> {
    let index = engine.get_index(&group.index_name)?;
    engine.submit_forced_incremental_update(&index, group.identities())
}
