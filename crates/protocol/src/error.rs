//! Error types for the protocol layer.
//!
//! Lookups never fail: a miss is `FormId::NULL` or `None`. Errors only come
//! from the framed transport, configuration and logging setup.

use edidmap_core::Error as CoreError;
use thiserror::Error;

/// Protocol errors
#[derive(Debug, Error)]
pub enum Error {
    /// Stream read or write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame body could not be encoded
    #[error("encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Frame body could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// Declared frame length exceeds the limit
    #[error("frame too large: {len} bytes (max {max})")]
    FrameTooLarge {
        /// Declared length
        len: usize,
        /// Limit
        max: usize,
    },

    /// Responder answered with the wrong output variant
    #[error("unexpected output for {command}: {output}")]
    UnexpectedOutput {
        /// Command variant sent
        command: &'static str,
        /// Output variant received
        output: &'static str,
    },

    /// Connection closed before a reply arrived
    #[error("connection closed")]
    Closed,

    /// Subscriber could not be installed
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] CoreError),
}

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, Error>;
