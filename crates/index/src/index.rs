//! Bidirectional editor ID index
//!
//! - Forward: folded editor ID -> every handle captured under it
//! - Reverse: FormId -> the folded editor ID it was last captured under
//!
//! Both directions address keys through the [`KeyArena`], so the reverse
//! map never holds a reference into forward-map storage.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use edidmap_core::{fold_editor_id, is_folded, FormHandle, FormId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::arena::{KeyArena, KeyId};

/// Claimants of one editor ID. Almost every ID has a single claimant.
type Claimants<H> = SmallVec<[H; 1]>;

/// Summary counters for an index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Distinct folded editor IDs
    pub editor_ids: usize,
    /// Distinct FormIds (same as [`EditorIdIndex::size`])
    pub forms: usize,
    /// Total claimant entries, duplicates included
    pub claimants: usize,
    /// Editor IDs claimed by more than one content source
    pub conflicts: usize,
}

/// Runtime editor ID <-> FormId index.
///
/// Entries are created lazily by [`capture`](Self::capture) and never
/// removed. When several loaded content sources define the same editor ID,
/// [`lookup`](Self::lookup) returns the claimant from the highest mod index.
///
/// The index has no internal locking. Wrap it in a
/// [`SharedIndex`](crate::SharedIndex) when more than one thread touches it.
pub struct EditorIdIndex<H: FormHandle = FormId> {
    keys: KeyArena,
    /// Parallel to `keys`: `claimants[id.index()]` belongs to `id`
    claimants: Vec<Claimants<H>>,
    reverse: FxHashMap<FormId, KeyId>,
}

impl<H: FormHandle> EditorIdIndex<H> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            keys: KeyArena::new(),
            claimants: Vec::new(),
            reverse: FxHashMap::default(),
        }
    }

    /// Record that `handle` carries `editor_id`.
    ///
    /// Does nothing if either argument is absent, the editor ID is empty, or
    /// the handle's FormId is `FormId::NULL`.
    /// Otherwise the handle is appended to the folded ID's claimants (even
    /// if it is already there) and the reverse entry for its FormId is
    /// pointed at that key.
    pub fn capture(&mut self, editor_id: Option<&str>, handle: Option<H>) {
        let (Some(editor_id), Some(handle)) = (editor_id, handle) else {
            return;
        };
        if editor_id.is_empty() || handle.form_id().is_null() {
            return;
        }

        let folded: Cow<'_, str> = if is_folded(editor_id) {
            Cow::Borrowed(editor_id)
        } else {
            Cow::Owned(fold_editor_id(editor_id))
        };

        let (key, created) = self.keys.intern(&folded);
        if created {
            self.claimants.push(Claimants::new());
        }
        self.claimants[key.index()].push(handle);

        let form_id = handle.form_id();
        match self.reverse.insert(form_id, key) {
            Some(previous) if previous != key => {
                debug!(
                    target: "edidmap::index",
                    form_id = %form_id,
                    previous = self.keys.get(previous).unwrap_or_default(),
                    current = &*folded,
                    "FormId re-captured under a different editor ID"
                );
            }
            _ => {
                trace!(
                    target: "edidmap::index",
                    form_id = %form_id,
                    editor_id = &*folded,
                    "captured"
                );
            }
        }
    }

    /// Resolve an editor ID to its winning handle.
    ///
    /// The winner is the claimant with the highest mod index. Among equal
    /// mod indices the first captured one wins.
    pub fn resolve(&self, editor_id: &str) -> Option<H> {
        select_winner(self.claimants(editor_id))
    }

    /// Resolve an editor ID to a FormId, `FormId::NULL` if unknown.
    pub fn lookup(&self, editor_id: &str) -> FormId {
        self.resolve(editor_id)
            .map_or(FormId::NULL, |handle| handle.form_id())
    }

    /// Editor ID last captured for `form_id`, in folded form.
    pub fn reverse_lookup(&self, form_id: FormId) -> Option<&str> {
        self.reverse
            .get(&form_id)
            .and_then(|&key| self.keys.get(key))
    }

    /// Same as [`reverse_lookup`](Self::reverse_lookup), returned as a
    /// shared handle to the stored key.
    pub fn reverse_lookup_shared(&self, form_id: FormId) -> Option<Arc<str>> {
        self.reverse
            .get(&form_id)
            .and_then(|&key| self.keys.get_shared(key))
    }

    /// Every handle captured under `editor_id`, in capture order
    pub fn claimants(&self, editor_id: &str) -> &[H] {
        if editor_id.is_empty() {
            return &[];
        }
        let key = if is_folded(editor_id) {
            self.keys.find(editor_id)
        } else {
            self.keys.find(&fold_editor_id(editor_id))
        };
        key.and_then(|key| self.claimants.get(key.index()))
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    /// Check whether any handle was captured under `editor_id`
    pub fn contains(&self, editor_id: &str) -> bool {
        !self.claimants(editor_id).is_empty()
    }

    /// Number of distinct FormIds ever captured
    pub fn size(&self) -> usize {
        self.reverse.len()
    }

    /// Same as [`size`](Self::size)
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    /// Check if nothing has been captured
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// Number of distinct folded editor IDs
    pub fn editor_id_count(&self) -> usize {
        self.keys.len()
    }

    /// Iterate `(folded editor ID, claimants)` in key creation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[H])> {
        self.keys
            .iter()
            .zip(self.claimants.iter())
            .map(|((_, key), claimants)| (key, claimants.as_slice()))
    }

    /// Compute summary counters
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            editor_ids: self.keys.len(),
            forms: self.reverse.len(),
            ..IndexStats::default()
        };
        for claimants in &self.claimants {
            stats.claimants += claimants.len();
            if let Some(first) = claimants.first() {
                let first_mod = first.form_id().mod_index();
                if claimants
                    .iter()
                    .any(|h| h.form_id().mod_index() != first_mod)
                {
                    stats.conflicts += 1;
                }
            }
        }
        stats
    }
}

/// Pick the claimant with the strictly greatest mod index, first seen on ties.
fn select_winner<H: FormHandle>(claimants: &[H]) -> Option<H> {
    let mut best: Option<H> = None;
    for &candidate in claimants {
        match best {
            Some(current)
                if candidate.form_id().mod_index() <= current.form_id().mod_index() => {}
            _ => best = Some(candidate),
        }
    }
    best
}

impl<H: FormHandle> Default for EditorIdIndex<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: FormHandle> fmt::Debug for EditorIdIndex<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorIdIndex")
            .field("editor_ids", &self.keys.len())
            .field("forms", &self.reverse.len())
            .finish()
    }
}
