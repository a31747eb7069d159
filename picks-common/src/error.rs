//! Common error types for book picks

use thiserror::Error;

/// Common result type for book picks operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the resolver and the scorer
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error for resolved picks
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or file content
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
