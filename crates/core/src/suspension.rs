use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error};

use crate::error::Result;
use crate::traits::DynIndexingEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexingAction {
    Suspend,
    Resume,
}

impl fmt::Display for IndexingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexingAction::Suspend => f.write_str("suspend"),
            IndexingAction::Resume => f.write_str("resume"),
        }
    }
}

/// Best-effort suspend/resume of the indexing engine.
///
/// Neither call ever fails from the caller's point of view: engine errors and
/// panics are logged and dropped.
pub struct SuspensionController {
    engine: DynIndexingEngine,
}

impl SuspensionController {
    pub fn new(engine: DynIndexingEngine) -> Self {
        Self { engine }
    }

    pub fn suspend(&self) {
        Self::guarded(IndexingAction::Suspend, || self.engine.suspend());
    }

    pub fn resume(&self) {
        Self::guarded(IndexingAction::Resume, || self.engine.resume());
    }

    fn guarded<F>(action: IndexingAction, call: F)
    where
        F: FnOnce() -> Result<()>,
    {
        match panic::catch_unwind(AssertUnwindSafe(call)) {
            Ok(Ok(())) => debug!("indexing {action} requested"),
            Ok(Err(e)) => error!("Unable to stop or resume indexing. {action} failed: {e}"),
            Err(payload) => error!(
                "Unable to stop or resume indexing. {action} panicked: {}",
                panic_message(payload.as_ref())
            ),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}
