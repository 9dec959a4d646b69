//! SharedIndex: thread-safe handle to an [`EditorIdIndex`]
//!
//! The bare index assumes a single thread of control. Hosts that capture on
//! one thread and answer queries on another share a `SharedIndex` instead:
//! - `parking_lot::RwLock` so concurrent queries do not block each other
//! - reverse lookups return `Arc<str>` clones of the stored key, so callers
//!   keep the text after the read lock is released

use std::fmt;
use std::sync::Arc;

use edidmap_core::{FormHandle, FormId};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::index::{EditorIdIndex, IndexStats};

/// Cloneable, lock-guarded handle to one index
pub struct SharedIndex<H: FormHandle = FormId> {
    inner: Arc<RwLock<EditorIdIndex<H>>>,
}

impl<H: FormHandle> SharedIndex<H> {
    /// Create a handle to a new empty index
    pub fn new() -> Self {
        Self::from_index(EditorIdIndex::new())
    }

    /// Take ownership of an existing index
    pub fn from_index(index: EditorIdIndex<H>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// See [`EditorIdIndex::capture`]
    pub fn capture(&self, editor_id: Option<&str>, handle: Option<H>) {
        self.inner.write().capture(editor_id, handle);
    }

    /// See [`EditorIdIndex::lookup`]
    pub fn lookup(&self, editor_id: &str) -> FormId {
        self.inner.read().lookup(editor_id)
    }

    /// See [`EditorIdIndex::resolve`]
    pub fn resolve(&self, editor_id: &str) -> Option<H> {
        self.inner.read().resolve(editor_id)
    }

    /// See [`EditorIdIndex::reverse_lookup_shared`]
    pub fn reverse_lookup(&self, form_id: FormId) -> Option<Arc<str>> {
        self.inner.read().reverse_lookup_shared(form_id)
    }

    /// Copy of every handle captured under `editor_id`
    pub fn claimants(&self, editor_id: &str) -> Vec<H> {
        self.inner.read().claimants(editor_id).to_vec()
    }

    /// See [`EditorIdIndex::size`]
    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    /// See [`EditorIdIndex::stats`]
    pub fn stats(&self) -> IndexStats {
        self.inner.read().stats()
    }

    /// Hold the read lock for several borrowed queries
    pub fn read(&self) -> RwLockReadGuard<'_, EditorIdIndex<H>> {
        self.inner.read()
    }

    /// Hold the write lock for a batch of captures
    pub fn write(&self) -> RwLockWriteGuard<'_, EditorIdIndex<H>> {
        self.inner.write()
    }

    /// Check whether two handles refer to the same index
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<H: FormHandle> Clone for SharedIndex<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: FormHandle> fmt::Debug for SharedIndex<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedIndex").field(&*self.inner.read()).finish()
    }
}

impl<H: FormHandle> Default for SharedIndex<H> {
    fn default() -> Self {
        Self::new()
    }
}
