//! Capture adapter: the boundary between host hooks and the index
//!
//! The host-side hooks (vtable patches on the editor ID setters) are not part
//! of this crate. They call into a [`CaptureAdapter`] on the thread that owns
//! the object model:
//!
//! - `on_assign` whenever an editor ID is set on an object
//! - `on_assign_chained` for categories whose original setter must still run
//!   after the capture (cells and worldspaces)
//! - `on_read` whenever an editor ID is read through a combined
//!   getter/setter path; only categories listed in the [`CapturePolicy`]
//!   are captured
//!
//! The handle passed in only has to stay valid for the duration of the call.

use std::sync::atomic::{AtomicU64, Ordering};

use edidmap_core::{FormHandle, FormId, MapperConfig};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::shared::SharedIndex;

/// Which object categories are captured on editor ID reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturePolicy {
    /// Lower-cased category names
    read_categories: FxHashSet<String>,
}

impl CapturePolicy {
    /// Capture assignments only
    pub fn assign_only() -> Self {
        Self::default()
    }

    /// Also capture reads for the given categories (case-insensitive)
    pub fn with_read_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            read_categories: categories
                .into_iter()
                .map(|c| c.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Build the policy from `capture_on_read`
    pub fn from_config(config: &MapperConfig) -> Self {
        Self::with_read_categories(&config.capture_on_read)
    }

    /// Check whether reads of `category` are captured
    pub fn captures_reads(&self, category: &str) -> bool {
        !self.read_categories.is_empty()
            && self
                .read_categories
                .contains(&category.to_ascii_lowercase())
    }
}

/// Counters of adapter calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Assignment calls forwarded to the index
    pub assigns: u64,
    /// Read calls forwarded to the index
    pub reads: u64,
    /// Read calls dropped because the category is not read-captured
    pub skipped: u64,
}

/// Feeds host naming events into a [`SharedIndex`]
#[derive(Debug)]
pub struct CaptureAdapter<H: FormHandle = FormId> {
    index: SharedIndex<H>,
    policy: CapturePolicy,
    assigns: AtomicU64,
    reads: AtomicU64,
    skipped: AtomicU64,
}

impl<H: FormHandle> CaptureAdapter<H> {
    /// Create an adapter writing into `index`
    pub fn new(index: SharedIndex<H>, policy: CapturePolicy) -> Self {
        Self {
            index,
            policy,
            assigns: AtomicU64::new(0),
            reads: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        }
    }

    /// An editor ID was assigned to an object
    pub fn on_assign(&self, editor_id: Option<&str>, handle: Option<H>) {
        self.assigns.fetch_add(1, Ordering::Relaxed);
        self.index.capture(editor_id, handle);
    }

    /// An editor ID was assigned; capture it, then run the host's own setter.
    pub fn on_assign_chained<F>(&self, editor_id: Option<&str>, handle: Option<H>, original: F)
    where
        F: FnOnce(Option<&str>),
    {
        self.on_assign(editor_id, handle);
        original(editor_id);
    }

    /// An editor ID was read from an object of `category`
    pub fn on_read(&self, category: &str, editor_id: Option<&str>, handle: Option<H>) {
        if !self.policy.captures_reads(category) {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            trace!(target: "edidmap::capture", category, "read not captured");
            return;
        }
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.index.capture(editor_id, handle);
    }

    /// Snapshot of the call counters
    pub fn stats(&self) -> CaptureStats {
        CaptureStats {
            assigns: self.assigns.load(Ordering::Relaxed),
            reads: self.reads.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }

    /// The active policy
    pub fn policy(&self) -> &CapturePolicy {
        &self.policy
    }

    /// The index this adapter writes into
    pub fn index(&self) -> &SharedIndex<H> {
        &self.index
    }
}
