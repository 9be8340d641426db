use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid snapshot key: {0}")]
    InvalidKey(String),

    #[error("snapshot store lock poisoned")]
    Poisoned,

    #[error("{0}")]
    Other(String),
}
