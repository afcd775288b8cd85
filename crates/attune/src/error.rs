//! Error types for Attune

use thiserror::Error;

/// Main error type for Attune operations
#[derive(Error, Debug)]
pub enum AttuneError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// State loading/decoding errors
    #[error("State error: {0}")]
    State(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Attune operations
pub type Result<T> = std::result::Result<T, AttuneError>;
