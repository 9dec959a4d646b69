//! Command enum defining every query the responder answers.
//!
//! Commands are the typed form of the protocol messages. In-process callers
//! can use them directly through [`Responder::execute`](crate::Responder::execute);
//! out-of-process callers send them over the wire (see [`wire`](crate::wire)).
//!
//! Commands are:
//! - **Self-contained**: every parameter is in the variant
//! - **Serializable**: MessagePack on the wire, JSON for debugging
//! - **Read-only**: capture is not reachable through commands

use edidmap_core::FormId;
use serde::{Deserialize, Serialize};

use crate::message::ListenerId;

/// A query against the index or the readiness state.
///
/// | Command | Output |
/// |---------|--------|
/// | `Query` | `Output::FormId` |
/// | `ReverseQuery` | `Output::EditorId` |
/// | `RequestReady` | `Output::Bool` (true if a replay was delivered) |
/// | `IsReady` | `Output::Bool` |
/// | `Size` | `Output::Uint` |
/// | `Stats` | `Output::Stats` |
/// | `Ping` | `Output::Pong` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Editor ID -> FormId. An absent editor ID resolves to `FormId::NULL`.
    Query {
        /// Editor ID in any casing
        #[serde(default, skip_serializing_if = "Option::is_none")]
        editor_id: Option<String>,
    },

    /// FormId -> editor ID.
    ReverseQuery {
        /// FormId to resolve
        form_id: FormId,
    },

    /// Ask for a replay of the readiness notification.
    RequestReady {
        /// The registered listener asking
        listener: ListenerId,
    },

    /// Current readiness state.
    IsReady,

    /// Number of distinct FormIds captured.
    Size,

    /// Index summary counters.
    Stats,

    /// Liveness check.
    Ping,
}

impl Command {
    /// Forward query for `editor_id`
    pub fn query(editor_id: impl Into<String>) -> Self {
        Command::Query {
            editor_id: Some(editor_id.into()),
        }
    }

    /// Reverse query for `form_id`
    pub fn reverse_query(form_id: FormId) -> Self {
        Command::ReverseQuery { form_id }
    }

    /// Variant name, for logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Query { .. } => "Query",
            Command::ReverseQuery { .. } => "ReverseQuery",
            Command::RequestReady { .. } => "RequestReady",
            Command::IsReady => "IsReady",
            Command::Size => "Size",
            Command::Stats => "Stats",
            Command::Ping => "Ping",
        }
    }
}
