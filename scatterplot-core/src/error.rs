//! Error types for the scatterplot crates

use thiserror::Error;

/// Main error type for scatterplot operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A setting that makes the requested operation impossible, e.g. a vertex
    /// budget that cannot hold a single stamp.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for scatterplot operations
pub type Result<T> = std::result::Result<T, Error>;
