//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Input file not found or inaccessible
    FileNotFound(String),
    /// External program could not be started
    DependencyMissing(String),
    /// Text extraction failed for a file
    ExtractionFailed { path: String, reason: String },
    /// Configuration error
    ConfigError(String),
    /// Styling could not be read from a PDF
    ColorLookup(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::DependencyMissing(tool) => write!(f, "Error: {tool} is not installed."),
            CliError::ExtractionFailed { path, reason } => {
                write!(f, "Text extraction failed for {path}: {reason}")
            }
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ColorLookup(msg) => write!(f, "Color lookup failed: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
