use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallSyncError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Repository error: {0}")]
    Repository(String),
    #[error("Index not found: {0}")]
    IndexNotFound(String),
    #[error("Indexing engine error: {0}")]
    Engine(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, InstallSyncError>;
