use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortsError {
    #[error("Platform error: {0}")]
    Platform(String),
    #[error("Invalid sort key: {0} (expected port, pid or proto)")]
    InvalidSortKey(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PortsError>;
