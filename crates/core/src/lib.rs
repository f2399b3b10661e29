pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod intake;
pub mod logging;
pub mod model;
pub mod suspension;
pub mod traits;

pub use config::ReconcileConfig;
pub use dispatcher::{IndexUpdateDispatcher, PlanStats, ReconcileReport, SubmittedJob};
pub use error::{InstallSyncError, Result};
pub use handler::PackagingEventHandler;
pub use intake::{EventOrigin, InstallEventKind, InstallNotification, InstallSignal};
pub use model::{IndexGroup, IndexHandle, InstalledItemRef, ItemIdentity, ResolvedItem};
pub use suspension::{IndexingAction, SuspensionController};
pub use traits::{DynIndexingEngine, DynItemRepository, IndexingEngine, ItemRepository};

pub use installsync_jobs::{DynReindexJob, JobOutcome, ReindexJob, TaskJob};
