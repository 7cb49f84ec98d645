//! Error types for geosave-core

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

/// Result type alias using geosave-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in geosave-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote API error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Destination storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Checkpoint marker could not be read or written
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Another sync run holds the destination lock
    #[error("A sync is already running against {}", .0.display())]
    SyncInProgress(PathBuf),
}
