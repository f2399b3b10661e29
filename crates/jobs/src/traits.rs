use std::time::Duration;

use async_trait::async_trait;

use crate::types::{JobOutcome, JobState};

/// Handle to an asynchronous re-index job owned by the indexing engine.
///
/// A job moves from `Running` to `Done` exactly once and cannot be cancelled.
#[async_trait]
pub trait ReindexJob: Send + Sync {
    /// Label used in traces, usually the target index name.
    fn name(&self) -> &str;

    fn is_done(&self) -> bool;

    fn state(&self) -> JobState {
        if self.is_done() {
            JobState::Done
        } else {
            JobState::Running
        }
    }

    /// Outcome of a finished job. Engines that cannot tell success from failure
    /// report every finished job as succeeded.
    fn outcome(&self) -> Option<JobOutcome> {
        self.is_done().then_some(JobOutcome::Succeeded)
    }

    /// Resolves once the job is done. Jobs without a completion signal fall back
    /// to polling `is_done` every `poll_interval`.
    async fn wait_done(&self, poll_interval: Duration) {
        while !self.is_done() {
            tokio::time::sleep(poll_interval).await;
        }
    }
}
