use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::JobError;
use crate::traits::ReindexJob;
use crate::types::JobOutcome;

pub mod barrier;

pub use barrier::{WaitConfig, wait_all};

pub type DynReindexJob = Arc<dyn ReindexJob + Send + Sync>;

/// A job whose completion is signalled through a watch channel.
///
/// `is_done` and `wait_done` both read the same channel, so a waiter never
/// observes a job as running after `is_done` returned true.
pub struct TaskJob {
    name: String,
    done_rx: watch::Receiver<Option<JobOutcome>>,
}

/// Completion side of a [`TaskJob`]. Dropping it unfinished marks the job as
/// failed so waiters are never left hanging.
pub struct JobCompleter {
    name: String,
    done_tx: Option<watch::Sender<Option<JobOutcome>>>,
}

impl JobCompleter {
    pub fn complete(mut self, outcome: JobOutcome) {
        self.finish(outcome);
    }

    pub fn succeed(self) {
        self.complete(JobOutcome::Succeeded);
    }

    pub fn fail(self, reason: impl Into<String>) {
        self.complete(JobOutcome::Failed(reason.into()));
    }

    fn finish(&mut self, outcome: JobOutcome) {
        if let Some(done_tx) = self.done_tx.take() {
            done_tx.send_replace(Some(outcome));
        }
    }
}

impl Drop for JobCompleter {
    fn drop(&mut self) {
        if self.done_tx.is_some() {
            warn!("job {} dropped its completer without finishing", self.name);
            let reason = JobError::Abandoned(self.name.clone()).to_string();
            self.finish(JobOutcome::Failed(reason));
        }
    }
}

impl TaskJob {
    /// Creates a running job and the handle that finishes it. Useful when the
    /// work runs on a pool the engine owns.
    pub fn pending(name: impl Into<String>) -> (Self, JobCompleter) {
        let name = name.into();
        let (done_tx, done_rx) = watch::channel(None);
        (
            Self {
                name: name.clone(),
                done_rx,
            },
            JobCompleter {
                name,
                done_tx: Some(done_tx),
            },
        )
    }

    /// Runs `future` on the current tokio runtime.
    pub fn spawn<F>(name: impl Into<String>, future: F) -> Self
    where
        F: Future<Output = Result<(), JobError>> + Send + 'static,
    {
        let (job, completer) = Self::pending(name);
        let task = tokio::spawn(future);
        tokio::spawn(async move {
            completer.complete(outcome_of(task.await));
        });
        job
    }

    /// Runs synchronous `work` on the blocking pool.
    pub fn spawn_blocking<F>(name: impl Into<String>, work: F) -> Self
    where
        F: FnOnce() -> Result<(), JobError> + Send + 'static,
    {
        let (job, completer) = Self::pending(name);
        let task = tokio::task::spawn_blocking(work);
        tokio::spawn(async move {
            completer.complete(outcome_of(task.await));
        });
        job
    }

    pub fn into_dyn(self) -> DynReindexJob {
        Arc::new(self)
    }
}

fn outcome_of(joined: Result<Result<(), JobError>, tokio::task::JoinError>) -> JobOutcome {
    match joined {
        Ok(Ok(())) => JobOutcome::Succeeded,
        Ok(Err(e)) => JobOutcome::Failed(e.to_string()),
        Err(e) => JobOutcome::Failed(JobError::Join(e.to_string()).to_string()),
    }
}

#[async_trait]
impl ReindexJob for TaskJob {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_done(&self) -> bool {
        self.done_rx.borrow().is_some()
    }

    fn outcome(&self) -> Option<JobOutcome> {
        self.done_rx.borrow().clone()
    }

    async fn wait_done(&self, _poll_interval: Duration) {
        let mut done_rx = self.done_rx.clone();
        if done_rx.wait_for(|outcome| outcome.is_some()).await.is_err() {
            // Completer always publishes before dropping the sender.
            debug!("completion channel for job {} closed", self.name);
        }
    }
}
