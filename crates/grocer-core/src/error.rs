//! Error types for grocer-core

use thiserror::Error;

/// Result type alias using grocer-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in grocer-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
