//! Client side of the query protocol.
//!
//! A [`Client`] is what other modules embed to resolve editor IDs. It keeps
//! its own readiness flag, set by the readiness notification, and refuses to
//! query until the flag is set: lookups made too early return the sentinel
//! values without dispatching anything.
//!
//! The client talks to the responder through a [`Transport`]. The responder
//! itself is a transport (a same-process direct call); the
//! [`FramedTransport`](crate::wire::FramedTransport) carries the same
//! exchange over a byte stream.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use edidmap_core::FormId;
use tracing::{debug, warn};

use crate::message::{ListenerId, Message, MessageKind, QueryData};
use crate::readiness::ReadyListener;

/// Delivers a message to the responder and returns once it is answered.
pub trait Transport {
    /// Dispatch `message` synchronously. Answers are written into the
    /// message payload before this returns.
    ///
    /// Returns true if the message was delivered and answered.
    fn dispatch(&self, message: &mut Message<'_>) -> bool;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn dispatch(&self, message: &mut Message<'_>) -> bool {
        (**self).dispatch(message)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn dispatch(&self, message: &mut Message<'_>) -> bool {
        (**self).dispatch(message)
    }
}

/// Readiness flag a client shares with the responder's listener table
#[derive(Debug, Default)]
pub struct ReadyFlag(AtomicBool);

impl ReadyFlag {
    /// Check the flag
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self) {
        self.0.store(true, Ordering::Release);
    }
}

impl ReadyListener for ReadyFlag {
    fn on_ready(&self) {
        if !self.get() {
            debug!(target: "edidmap::client", "received ready signal");
        }
        self.set();
    }
}

/// Query client for one responder
#[derive(Debug)]
pub struct Client<T: Transport> {
    transport: T,
    flag: Arc<ReadyFlag>,
    listener: Option<ListenerId>,
    warn_early: bool,
}

impl<T: Transport> Client<T> {
    /// Create a client that is not yet ready
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            flag: Arc::new(ReadyFlag::default()),
            listener: None,
            warn_early: true,
        }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Log early lookups at `warn` (default) or `debug`
    pub fn with_early_query_warnings(mut self, warn_early: bool) -> Self {
        self.warn_early = warn_early;
        self
    }

    /// The listener to register for the readiness broadcast
    pub fn ready_listener(&self) -> Arc<dyn ReadyListener> {
        Arc::clone(&self.flag) as Arc<dyn ReadyListener>
    }

    /// Record the id the responder assigned to this client's listener
    pub fn set_listener_id(&mut self, id: ListenerId) {
        self.listener = Some(id);
    }

    /// Whether early lookups are logged at `warn`
    pub fn warns_early(&self) -> bool {
        self.warn_early
    }

    /// The registered listener id, if any
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.listener
    }

    /// Feed a message delivered by the host's messaging interface.
    ///
    /// Only `Ready` is meaningful to a client.
    pub fn handle_message(&self, message: &Message<'_>) {
        if message.kind == MessageKind::Ready {
            self.flag.on_ready();
        }
    }

    /// Check whether the readiness notification has arrived
    pub fn is_ready(&self) -> bool {
        self.flag.get()
    }

    /// Ask the responder to replay readiness to this client.
    ///
    /// Returns true if the replay was delivered. Before readiness the
    /// request is ignored by the responder.
    pub fn request_ready(&self) -> bool {
        match self.listener {
            Some(id) => self.transport.dispatch(&mut Message::request_ready(id)),
            None => false,
        }
    }

    /// Editor ID -> FormId. `FormId::NULL` if not found or not ready.
    pub fn lookup(&self, editor_id: &str) -> FormId {
        if !self.ready_for_query("Lookup") {
            return FormId::NULL;
        }
        let mut data = QueryData::forward(editor_id);
        self.transport.dispatch(&mut Message::query(&mut data));
        data.form_id
    }

    /// FormId -> editor ID. `None` if not found or not ready.
    ///
    /// The returned text is the responder's stored key. It is immutable and
    /// stays valid for as long as the caller holds it.
    pub fn reverse_lookup(&self, form_id: FormId) -> Option<Arc<str>> {
        if !self.ready_for_query("ReverseLookup") {
            return None;
        }
        let mut data = QueryData::reverse(form_id);
        self.transport.dispatch(&mut Message::reverse_query(&mut data));
        data.editor_id
    }

    fn ready_for_query(&self, operation: &'static str) -> bool {
        if self.is_ready() {
            return true;
        }
        if self.warn_early {
            warn!(target: "edidmap::client", operation, "{} before ready", operation);
        } else {
            debug!(target: "edidmap::client", operation, "{} before ready", operation);
        }
        false
    }
}
