use tracing::{debug, error, warn};

use crate::config::ReconcileConfig;
use crate::dispatcher::{IndexUpdateDispatcher, ReconcileReport};
use crate::intake::{self, EventOrigin, InstallNotification, InstallSignal};
use crate::suspension::SuspensionController;
use crate::traits::{DynIndexingEngine, DynItemRepository};

/// Entry point for the host's installation events.
///
/// Every method is infallible: failures are logged and never reach the
/// installer.
pub struct PackagingEventHandler {
    dispatcher: IndexUpdateDispatcher,
    suspension: SuspensionController,
    config: ReconcileConfig,
}

impl PackagingEventHandler {
    pub fn new(
        repository: DynItemRepository,
        engine: DynIndexingEngine,
        config: ReconcileConfig,
    ) -> Self {
        Self {
            dispatcher: IndexUpdateDispatcher::new(repository, engine.clone(), &config),
            suspension: SuspensionController::new(engine),
            config,
        }
    }

    /// Returns the reconciliation report when the notification carried items.
    pub async fn handle(&self, notification: &InstallNotification) -> Option<ReconcileReport> {
        match intake::translate(notification) {
            Some(signal) => self.on_signal(signal).await,
            None => {
                debug!(
                    "ignored {:?} notification from {:?}",
                    notification.kind(),
                    notification.origin()
                );
                None
            }
        }
    }

    /// Same as [`handle`](Self::handle) for notifications received serialized,
    /// e.g. replayed from another node. Unparseable input is ignored.
    pub async fn handle_json(&self, raw: &str) -> Option<ReconcileReport> {
        match serde_json::from_str::<InstallNotification>(raw) {
            Ok(notification) => self.handle(&notification).await,
            Err(e) => {
                debug!("ignored unparseable install notification: {e}");
                None
            }
        }
    }

    pub async fn on_signal(&self, signal: InstallSignal) -> Option<ReconcileReport> {
        match signal {
            InstallSignal::InstallStarting(_) => {
                if self.config.suspend_during_install {
                    self.suspension.suspend();
                }
                None
            }
            InstallSignal::PostStepStarting(EventOrigin::Remote) => {
                warn!(
                    "Resuming indexing while executing package post step action on a remote instance."
                );
                self.suspension.resume();
                None
            }
            InstallSignal::PostStepStarting(EventOrigin::Local) => None,
            InstallSignal::ItemsInstalled { refs, .. } => {
                match self.dispatcher.reconcile_installed_items(refs).await {
                    Ok(report) => Some(report),
                    Err(e) => {
                        error!("Failed to update installed items: {e}");
                        None
                    }
                }
            }
            InstallSignal::InstallEnded(_) => {
                if self.config.suspend_during_install {
                    self.suspension.resume();
                }
                None
            }
        }
    }
}
