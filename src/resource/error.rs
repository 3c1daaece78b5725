use crate::config::ConfigError;
use crate::storage::StorageError;
use crate::version::error::VersionParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Invalid source configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage request failed: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Version(#[from] VersionParseError),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid source configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage request failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to write artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Requested version does not fit the source's addressing mode")]
    VersionMismatch,

    #[error("Object key {0:?} has no file name")]
    EmptyFileName(String),
}
