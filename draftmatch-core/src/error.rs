//! Error types for the comparison core

use thiserror::Error;

/// Error type for core operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Writing a report failed
    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a report record failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
