//! Identifier index for edidmap
//!
//! This crate implements the runtime editor ID index with:
//! - KeyArena: append-only storage of folded editor IDs with stable KeyIds
//! - EditorIdIndex: forward (editor ID -> claimants) and reverse
//!   (FormId -> editor ID) maps with the load-order conflict policy
//! - SharedIndex: RwLock-guarded handle for multi-threaded hosts
//! - CaptureAdapter: the calling contract the host hooks feed into
//!
//! # Key stability
//!
//! The reverse map never points into the forward map's storage. Both maps
//! hold `KeyId`s into the arena, and arena slots are never removed or moved,
//! so a key handed out for a FormId stays valid for the life of the index.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arena;
pub mod capture;
pub mod index;
pub mod shared;

pub use arena::{KeyArena, KeyId};
pub use capture::{CaptureAdapter, CapturePolicy, CaptureStats};
pub use index::{EditorIdIndex, IndexStats};
pub use shared::SharedIndex;
