use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("job failed: {0}")]
    Failed(String),
    #[error("job abandoned before completion: {0}")]
    Abandoned(String),
    #[error("job task join failure: {0}")]
    Join(String),
}
