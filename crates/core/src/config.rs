use std::path::Path;

use installsync_jobs::WaitConfig;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tuning for reconciliation and for the indexing suspension around installs.
///
/// Missing keys fall back to the defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReconcileConfig {
    /// Poll interval for jobs that cannot signal completion themselves.
    pub poll_interval_ms: u64,
    /// Suspend indexing when an install starts and resume it when it ends.
    pub suspend_during_install: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            suspend_during_install: true,
        }
    }
}

impl ReconcileConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn wait_config(&self) -> WaitConfig {
        WaitConfig {
            poll_interval_ms: self.poll_interval_ms,
        }
    }
}
