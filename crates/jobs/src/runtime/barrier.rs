use std::time::Duration;

use futures::future::join_all;
use tracing::debug;

use crate::runtime::DynReindexJob;
use crate::types::JobOutcome;

#[derive(Debug, Clone)]
pub struct WaitConfig {
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

impl WaitConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// Waits until every job is done, in whatever order they finish.
///
/// There is no timeout. Outcomes are returned in the order of `jobs`.
pub async fn wait_all(jobs: &[DynReindexJob], config: &WaitConfig) -> Vec<JobOutcome> {
    if jobs.is_empty() {
        return Vec::new();
    }

    let poll_interval = config.poll_interval();
    join_all(jobs.iter().map(|job| async move {
        job.wait_done(poll_interval).await;
        let outcome = job.outcome().unwrap_or(JobOutcome::Succeeded);
        debug!("job {} done: {:?}", job.name(), outcome);
        outcome
    }))
    .await
}
