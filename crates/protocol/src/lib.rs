//! # edidmap protocol
//!
//! The query side of edidmap: how other modules find the index, learn that
//! it is complete, and ask it questions.
//!
//! - [`Responder`] - answers queries from a [`SharedIndex`](edidmap_index::SharedIndex)
//!   and drives the readiness handshake
//! - [`Client`] - what consuming modules embed; refuses to query before ready
//! - [`Message`] - in-process messages keyed by four-character codes
//! - [`Command`]/[`Output`] - typed queries, also carried over [`wire`]
//!
//! ## Handshake
//!
//! ```text
//! client                         responder
//!   | register listener ------------> |
//!   |                                 |  (host loads content, index fills)
//!   |                                 |  HostEvent::GameInitialized
//!   | <------------------- 'EMRD' --- |  exactly once per listener
//!   | 'EMQR' { editor_id } ---------> |
//!   | <------------- { form_id } ---- |  synchronous, written in place
//! ```
//!
//! A client that registers late sends `'EMRR'` and receives a replay of
//! `'EMRD'` addressed only to itself.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod command;
mod error;
mod logging;
pub mod message;
mod output;
mod readiness;
mod responder;
mod types;
pub mod wire;

#[cfg(test)]
mod tests;

pub use client::{Client, ReadyFlag, Transport};
pub use command::Command;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use message::{
    ListenerId, Message, MessageKind, Payload, QueryData, MSG_QUERY, MSG_READY,
    MSG_REQUEST_READY, MSG_REVERSE_QUERY,
};
pub use output::Output;
pub use readiness::{ReadyListener, ReadyState, Readiness};
pub use responder::Responder;
pub use types::{HostEvent, StatsInfo};
pub use wire::{connect_framed, serve_connection, sync_ready, FramedTransport};
