//! Error types for the layout engine, its storage and its outer API.

use thiserror::Error;

/// Errors raised by the layout core
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The text could not be decoded into a structured layout document
    #[error("Malformed layout document: {0}")]
    MalformedDocument(String),

    /// Two nodes of the same topology tree share an id
    #[error("Duplicate node id in topology tree: {0}")]
    DuplicateNodeId(String),
}

/// Persistence failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors surfaced by the directory, session, config and CLI layers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network not found: {0}")]
    NetworkNotFound(String),

    #[error("No permission for user {user_id} on network {network_id}")]
    PermissionNotFound { network_id: String, user_id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
