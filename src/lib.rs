//! edidmap - runtime editor ID <-> FormId index
//!
//! The host engine discards editor IDs for most object types once content
//! has loaded. edidmap captures them while loading, indexes them case
//! insensitively, and answers lookups from other modules once every content
//! source has loaded.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use edidmap::{CaptureAdapter, CapturePolicy, HostEvent, MapperConfig, Responder, SharedIndex};
//!
//! let config = MapperConfig::load_or_init(path)?;
//! edidmap::init_logging(&config)?;
//!
//! let index = SharedIndex::new();
//! let capture = CaptureAdapter::new(index.clone(), CapturePolicy::from_config(&config));
//! let responder = Arc::new(Responder::new(index, &config));
//!
//! // Host hooks: capture.on_assign(editor_id, form) while content loads.
//! // Host lifecycle: responder.on_host_event(HostEvent::GameInitialized).
//!
//! let client = responder.connect("MyModule");
//! let dagger = client.lookup("WeapIronDagger");
//! ```
//!
//! # Architecture
//!
//! - `edidmap-core`: FormId, case folding, configuration
//! - `edidmap-index`: the index, its locked handle and the capture adapter
//! - `edidmap-protocol`: readiness handshake, queries, framed transport

// Re-export the public API from edidmap-protocol
pub use edidmap_protocol::*;

pub use edidmap_core::{
    fold_editor_id, FormHandle, FormId, MapperConfig, CONFIG_FILE_NAME, DEFAULT_PLUGIN_NAME,
};
pub use edidmap_index::{
    CaptureAdapter, CapturePolicy, CaptureStats, EditorIdIndex, IndexStats, KeyArena, KeyId,
    SharedIndex,
};
