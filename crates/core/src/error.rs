//! Error types for edidmap
//!
//! The index and query operations never fail: absence is reported through
//! sentinels. This error type covers the ambient layers only (configuration
//! files and I/O). We use `thiserror` for automatic `Display` and `Error`
//! trait implementations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for edidmap-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for configuration and I/O
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file could not be read or written
    #[error("Failed to access config file '{}': {source}", path.display())]
    ConfigAccess {
        /// Path of the config file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Config file is not valid TOML for `MapperConfig`
    #[error("Failed to parse config file '{}': {reason}", path.display())]
    ConfigParse {
        /// Path of the config file
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Config parsed but holds an unusable value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Build an `InvalidConfig` error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig(reason.into())
    }
}
