//! Common error types for Portfolio X-Ray

use thiserror::Error;

/// Common result type for Portfolio X-Ray operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Portfolio X-Ray services
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// PDF document assembly or serialization error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
