//! Error types for post generation

use thiserror::Error;

/// Result type alias for post-generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating posts
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to decode an input image
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    /// Failed to encode a rendered post
    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    /// Failed to assemble the output archive
    #[error("Failed to write archive: {0}")]
    ArchiveError(String),

    /// Input validation failed before rendering
    #[error("Invalid input: {0}")]
    ValidationError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
