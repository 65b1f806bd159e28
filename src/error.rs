//! Error types for the dashboard server

use thiserror::Error;

/// Server result type
pub type ServerResult<T> = Result<T, ServerError>;

/// Dashboard server errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Asset lookup or decode failed
    #[error("Asset error: {0}")]
    Asset(#[from] crate::core::error::AssetError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// I/O error (bind, accept)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
