//! In-process message framing.
//!
//! A [`Message`] is dispatched as a direct, synchronous call: the responder
//! writes its answer into the caller's [`QueryData`] before `dispatch`
//! returns. Nothing is queued.
//!
//! Message kinds are the four-character codes other modules already use,
//! packed big-endian into a `u32` (`'EMQR'` -> `0x454D5152`).

use std::fmt;
use std::sync::Arc;

use edidmap_core::FormId;
use serde::{Deserialize, Serialize};

const fn fourcc(code: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*code)
}

/// Readiness broadcast, no payload
pub const MSG_READY: u32 = fourcc(b"EMRD");
/// Editor ID -> FormId query
pub const MSG_QUERY: u32 = fourcc(b"EMQR");
/// FormId -> editor ID query
pub const MSG_REVERSE_QUERY: u32 = fourcc(b"EMRQ");
/// "Are you ready yet" request
pub const MSG_REQUEST_READY: u32 = fourcc(b"EMRR");

/// Kind of a protocol message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// `'EMRD'`
    Ready,
    /// `'EMQR'`
    Query,
    /// `'EMRQ'`
    ReverseQuery,
    /// `'EMRR'`
    RequestReady,
    /// Any other code; ignored by the responder
    Unknown(u32),
}

impl MessageKind {
    /// Decode a raw message type
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            MSG_READY => MessageKind::Ready,
            MSG_QUERY => MessageKind::Query,
            MSG_REVERSE_QUERY => MessageKind::ReverseQuery,
            MSG_REQUEST_READY => MessageKind::RequestReady,
            other => MessageKind::Unknown(other),
        }
    }

    /// Encode to the raw message type
    pub const fn as_raw(self) -> u32 {
        match self {
            MessageKind::Ready => MSG_READY,
            MessageKind::Query => MSG_QUERY,
            MessageKind::ReverseQuery => MSG_REVERSE_QUERY,
            MessageKind::RequestReady => MSG_REQUEST_READY,
            MessageKind::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.as_raw().to_be_bytes();
        if raw.iter().all(|b| b.is_ascii_graphic()) {
            write!(f, "'{}'", String::from_utf8_lossy(&raw))
        } else {
            write!(f, "0x{:08X}", self.as_raw())
        }
    }
}

/// Identifies a registered readiness listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Exchange buffer shared by both query kinds.
///
/// | Kind | Caller fills | Responder writes |
/// |------|--------------|------------------|
/// | Query | `editor_id` | `form_id` (`NULL` if unknown) |
/// | ReverseQuery | `form_id` | `editor_id` (`None` if unknown) |
///
/// On a reverse query the returned `editor_id` is the index's own stored
/// key, not a copy. It is immutable and never needs to be freed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryData {
    /// In for Query, out for ReverseQuery
    pub editor_id: Option<Arc<str>>,
    /// Out for Query, in for ReverseQuery
    pub form_id: FormId,
}

impl QueryData {
    /// Buffer for a forward query
    pub fn forward(editor_id: &str) -> Self {
        Self {
            editor_id: Some(Arc::from(editor_id)),
            form_id: FormId::NULL,
        }
    }

    /// Buffer for a reverse query
    pub fn reverse(form_id: FormId) -> Self {
        Self {
            editor_id: None,
            form_id,
        }
    }
}

/// Message payload
#[derive(Debug)]
pub enum Payload<'a> {
    /// No data
    Empty,
    /// A query exchange buffer
    Query(&'a mut QueryData),
    /// Bytes of a foreign or malformed payload
    Bytes(&'a [u8]),
}

/// A message as delivered by the host's messaging interface
#[derive(Debug)]
pub struct Message<'a> {
    /// Listener that sent the message, when known
    pub sender: Option<ListenerId>,
    /// Message kind
    pub kind: MessageKind,
    /// Data attached to the message
    pub payload: Payload<'a>,
}

impl<'a> Message<'a> {
    /// Build a message from a raw type code
    pub fn raw(kind: u32, payload: Payload<'a>) -> Self {
        Self {
            sender: None,
            kind: MessageKind::from_raw(kind),
            payload,
        }
    }

    /// Readiness broadcast
    pub fn ready() -> Self {
        Self {
            sender: None,
            kind: MessageKind::Ready,
            payload: Payload::Empty,
        }
    }

    /// Readiness request from `sender`
    pub fn request_ready(sender: ListenerId) -> Self {
        Self {
            sender: Some(sender),
            kind: MessageKind::RequestReady,
            payload: Payload::Empty,
        }
    }

    /// Editor ID -> FormId query
    pub fn query(data: &'a mut QueryData) -> Self {
        Self {
            sender: None,
            kind: MessageKind::Query,
            payload: Payload::Query(data),
        }
    }

    /// FormId -> editor ID query
    pub fn reverse_query(data: &'a mut QueryData) -> Self {
        Self {
            sender: None,
            kind: MessageKind::ReverseQuery,
            payload: Payload::Query(data),
        }
    }

    /// Set the sender
    pub fn from_sender(mut self, sender: ListenerId) -> Self {
        self.sender = Some(sender);
        self
    }

    /// The exchange buffer, if this message carries one
    pub fn query_data(&mut self) -> Option<&mut QueryData> {
        match &mut self.payload {
            Payload::Query(data) => Some(&mut **data),
            _ => None,
        }
    }
}
