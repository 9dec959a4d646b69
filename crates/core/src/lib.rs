//! Core types for edidmap
//!
//! This crate defines the foundational types used throughout the system:
//! - FormId: 32-bit numeric object id (mod index + slot)
//! - FormHandle: non-owning handle to a host object carrying its FormId
//! - fold_editor_id: ASCII case folding applied to every editor ID key
//! - MapperConfig: `edidmap.toml` configuration
//! - Error: Error type for configuration and I/O

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{MapperConfig, CONFIG_FILE_NAME, DEFAULT_PLUGIN_NAME};
pub use error::{Error, Result};
pub use types::{fold_editor_id, is_folded, FormHandle, FormId};
