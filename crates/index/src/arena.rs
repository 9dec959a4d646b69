//! Append-only key arena
//!
//! Folded editor IDs are stored once, in creation order, and addressed by a
//! `KeyId`. Slots are never removed, replaced or relocated, so a `KeyId`
//! (and any `Arc<str>` handed out for it) stays valid for as long as the
//! arena lives, no matter how many keys are added afterwards.

use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Stable address of a key inside a [`KeyArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(usize);

impl KeyId {
    /// Position of the key in creation order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Append-only interned key storage
#[derive(Debug, Default)]
pub struct KeyArena {
    /// Keys in creation order; `KeyId(n)` is `keys[n]`
    keys: Vec<Arc<str>>,
    /// Text -> slot
    ids: FxHashMap<Arc<str>, KeyId>,
}

impl KeyArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the slot of an existing key
    pub fn find(&self, key: &str) -> Option<KeyId> {
        self.ids.get(key).copied()
    }

    /// Return the slot for `key`, creating it if needed.
    ///
    /// The boolean is true when a new slot was created.
    pub fn intern(&mut self, key: &str) -> (KeyId, bool) {
        if let Some(id) = self.find(key) {
            return (id, false);
        }
        let id = KeyId(self.keys.len());
        let stored: Arc<str> = Arc::from(key);
        self.keys.push(Arc::clone(&stored));
        self.ids.insert(stored, id);
        (id, true)
    }

    /// Borrow the key stored at `id`
    pub fn get(&self, id: KeyId) -> Option<&str> {
        self.keys.get(id.0).map(|k| &**k)
    }

    /// Shared handle to the key stored at `id`
    ///
    /// The returned `Arc` points at the arena's own allocation.
    pub fn get_shared(&self, id: KeyId) -> Option<Arc<str>> {
        self.keys.get(id.0).cloned()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate keys in creation order
    pub fn iter(&self) -> impl Iterator<Item = (KeyId, &str)> {
        self.keys.iter().enumerate().map(|(i, k)| (KeyId(i), &**k))
    }
}
