//! The Responder - the index's side of the query protocol.
//!
//! The Responder owns nothing but handles: the [`SharedIndex`] it answers
//! from and the [`Readiness`] state it broadcasts. Every query is answered
//! synchronously on the caller's thread.

use std::sync::Arc;

use edidmap_core::{FormHandle, FormId, MapperConfig};
use edidmap_index::SharedIndex;
use tracing::{debug, info};

use crate::client::{Client, Transport};
use crate::message::{ListenerId, Message, MessageKind, Payload};
use crate::readiness::{ReadyListener, Readiness};
use crate::types::{HostEvent, StatsInfo};
use crate::{Command, Output};

/// Answers queries against one index and drives the readiness handshake.
///
/// Queries made before readiness are answered from whatever has been
/// captured so far; they do not fail. Clients are expected to wait for the
/// readiness notification.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use edidmap_protocol::{Responder, HostEvent, Command, Output};
///
/// let responder = Arc::new(Responder::new(index.clone(), &config));
/// let client = responder.connect("MyModule");
///
/// // ... host loads content, hooks capture into `index` ...
/// responder.on_host_event(HostEvent::GameInitialized);
///
/// assert!(client.is_ready());
/// let id = client.lookup("WeapIronDagger");
/// ```
pub struct Responder<H: FormHandle = FormId> {
    index: SharedIndex<H>,
    readiness: Readiness,
    name: String,
    warn_early: bool,
}

impl<H: FormHandle> Responder<H> {
    /// Create a responder answering from `index`
    pub fn new(index: SharedIndex<H>, config: &MapperConfig) -> Self {
        Self {
            index,
            readiness: Readiness::new(),
            name: config.plugin_name.clone(),
            warn_early: config.warn_early_queries,
        }
    }

    /// Name listeners address this responder by
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The index being served
    pub fn index(&self) -> &SharedIndex<H> {
        &self.index
    }

    /// The readiness state
    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    /// Check whether readiness has been broadcast
    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    /// Register a listener for the readiness broadcast
    pub fn register_listener(&self, name: &str, listener: Arc<dyn ReadyListener>) -> ListenerId {
        self.readiness.register(name, listener)
    }

    /// Create an in-process client registered for readiness as `name`.
    pub fn connect(self: &Arc<Self>, name: &str) -> Client<Arc<Self>> {
        let mut client =
            Client::new(Arc::clone(self)).with_early_query_warnings(self.warn_early);
        let id = self.register_listener(name, client.ready_listener());
        client.set_listener_id(id);
        client
    }

    /// React to a host lifecycle signal.
    ///
    /// `GameInitialized` moves to `Ready` and broadcasts; returns true only
    /// when that transition happened on this call.
    pub fn on_host_event(&self, event: HostEvent) -> bool {
        match event {
            HostEvent::GameInitialized => match self.readiness.mark_ready() {
                Some(notified) => {
                    let stats = self.index.stats();
                    info!(
                        target: "edidmap::protocol",
                        entries = stats.forms,
                        editor_ids = stats.editor_ids,
                        conflicts = stats.conflicts,
                        listeners = notified,
                        "{}: broadcast ready",
                        self.name
                    );
                    true
                }
                None => false,
            },
            HostEvent::Other(_) => false,
        }
    }

    /// Handle one protocol message, writing answers into its payload.
    ///
    /// Returns true if the message was answered. Messages of unknown kind
    /// and query messages without a `QueryData` payload are dropped.
    pub fn handle_message(&self, message: &mut Message<'_>) -> bool {
        let kind = message.kind;
        match kind {
            MessageKind::Query => match &mut message.payload {
                Payload::Query(data) => {
                    data.form_id = self.lookup(data.editor_id.as_deref());
                    true
                }
                _ => self.drop_malformed(kind),
            },
            MessageKind::ReverseQuery => match &mut message.payload {
                Payload::Query(data) => {
                    self.note_early_query(kind);
                    data.editor_id = self.index.reverse_lookup(data.form_id);
                    true
                }
                _ => self.drop_malformed(kind),
            },
            MessageKind::RequestReady => match message.sender {
                Some(sender) => self.readiness.request_ready(sender),
                None => self.drop_malformed(kind),
            },
            MessageKind::Ready | MessageKind::Unknown(_) => false,
        }
    }

    /// Execute a typed command
    pub fn execute(&self, command: Command) -> Output {
        match command {
            Command::Query { editor_id } => Output::FormId(self.lookup(editor_id.as_deref())),
            Command::ReverseQuery { form_id } => {
                self.note_early_query(MessageKind::ReverseQuery);
                Output::EditorId(self.index.reverse_lookup(form_id))
            }
            Command::RequestReady { listener } => {
                Output::Bool(self.readiness.request_ready(listener))
            }
            Command::IsReady => Output::Bool(self.is_ready()),
            Command::Size => Output::Uint(self.index.size() as u64),
            Command::Stats => Output::Stats(StatsInfo::new(self.index.stats(), self.is_ready())),
            Command::Ping => Output::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    fn lookup(&self, editor_id: Option<&str>) -> FormId {
        self.note_early_query(MessageKind::Query);
        editor_id.map_or(FormId::NULL, |id| self.index.lookup(id))
    }

    fn note_early_query(&self, kind: MessageKind) {
        if !self.is_ready() {
            debug!(target: "edidmap::protocol", %kind, "answering query before ready");
        }
    }

    fn drop_malformed(&self, kind: MessageKind) -> bool {
        debug!(target: "edidmap::protocol", %kind, "malformed message dropped");
        false
    }
}

impl<H: FormHandle> Transport for Responder<H> {
    fn dispatch(&self, message: &mut Message<'_>) -> bool {
        self.handle_message(message)
    }
}

impl<H: FormHandle> std::fmt::Debug for Responder<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("readiness", &self.readiness)
            .finish()
    }
}
