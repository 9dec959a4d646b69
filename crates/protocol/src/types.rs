//! Serializable views of index state returned by the protocol.

use edidmap_index::IndexStats;
use serde::{Deserialize, Serialize};

/// Index summary returned by `Command::Stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsInfo {
    /// Distinct folded editor IDs
    pub editor_ids: u64,
    /// Distinct FormIds
    pub forms: u64,
    /// Claimant entries, duplicates included
    pub claimants: u64,
    /// Editor IDs claimed by more than one content source
    pub conflicts: u64,
    /// Whether readiness has been broadcast
    pub ready: bool,
}

impl StatsInfo {
    /// Build from index counters and the readiness flag
    pub fn new(stats: IndexStats, ready: bool) -> Self {
        Self {
            editor_ids: stats.editor_ids as u64,
            forms: stats.forms as u64,
            claimants: stats.claimants as u64,
            conflicts: stats.conflicts as u64,
            ready,
        }
    }
}

/// Host lifecycle signals the responder reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Every content source has loaded; all editor IDs have been captured
    GameInitialized,
    /// Any other host message; ignored
    Other(u32),
}
