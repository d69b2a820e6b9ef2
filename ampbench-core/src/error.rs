//! Structured error types for the ampbench workspace.

use thiserror::Error;

/// Unified error type for all ampbench operations.
#[derive(Debug, Error)]
pub enum AmpError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed table, FASTA or JSON payload)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (bad arguments, misaligned tables, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration rejected by validation
    #[error("configuration error: {0}")]
    Config(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the ampbench crates.
pub type Result<T> = std::result::Result<T, AmpError>;
