use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("history not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}
