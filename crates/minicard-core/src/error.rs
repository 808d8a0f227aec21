//! Error types for minicard-core

use thiserror::Error;

/// Result type alias using minicard-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in minicard-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key-value storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Note or card not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Text that does not describe a complete application state
    #[error("Invalid state blob: {0}")]
    InvalidState(String),

    /// Clipboard write refused or unavailable
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Fullscreen request refused or unavailable
    #[error("Presentation error: {0}")]
    Presentation(String),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}
