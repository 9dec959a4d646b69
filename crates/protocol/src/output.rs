//! Output enum for command results.
//!
//! Every command produces exactly one output variant. The mapping is
//! deterministic; see the table on [`Command`](crate::Command).

use std::sync::Arc;

use edidmap_core::FormId;
use serde::{Deserialize, Serialize};

use crate::types::StatsInfo;

/// Result of executing a [`Command`](crate::Command).
///
/// `EditorId` carries the index's own stored key. In-process callers get
/// the same allocation the index holds; nothing is copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// Resolved FormId, `FormId::NULL` if not found
    FormId(FormId),

    /// Resolved folded editor ID, `None` if not found
    EditorId(Option<Arc<str>>),

    /// Boolean result
    Bool(bool),

    /// Count result
    Uint(u64),

    /// Index summary
    Stats(StatsInfo),

    /// Ping reply
    Pong {
        /// Crate version of the responder
        version: String,
    },
}

impl Output {
    /// Variant name, for logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Output::FormId(_) => "FormId",
            Output::EditorId(_) => "EditorId",
            Output::Bool(_) => "Bool",
            Output::Uint(_) => "Uint",
            Output::Stats(_) => "Stats",
            Output::Pong { .. } => "Pong",
        }
    }
}
