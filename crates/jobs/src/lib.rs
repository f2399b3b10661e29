pub mod error;
pub mod runtime;
pub mod traits;
pub mod types;

pub use error::JobError;
pub use runtime::{DynReindexJob, JobCompleter, TaskJob, WaitConfig, wait_all};
pub use traits::ReindexJob;
pub use types::{JobOutcome, JobState};
