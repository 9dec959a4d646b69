//! Readiness state machine.
//!
//! ```text
//! NotReady --mark_ready()--> Ready   (terminal)
//! ```
//!
//! Entering `Ready` notifies every registered listener exactly once. After
//! that, a listener that asks explicitly gets a targeted replay; nobody else
//! is notified again. Requests made while `NotReady` are ignored: a
//! registered listener will receive the broadcast when it happens.
//!
//! Listeners are invoked outside the registration lock, so a listener may
//! call back into the responder (for example to issue its first query).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::message::ListenerId;

/// Receives the readiness notification
pub trait ReadyListener: Send + Sync {
    /// Called once when the index becomes ready, and again on each
    /// explicit replay request
    fn on_ready(&self);
}

impl<F> ReadyListener for F
where
    F: Fn() + Send + Sync,
{
    fn on_ready(&self) {
        self()
    }
}

/// Readiness state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Content is still loading; the index is incomplete
    NotReady,
    /// All content has loaded; never reverts
    Ready,
}

struct Registration {
    id: ListenerId,
    name: String,
    listener: Arc<dyn ReadyListener>,
}

/// Readiness flag plus the listener table
pub struct Readiness {
    ready: AtomicBool,
    listeners: Mutex<Vec<Registration>>,
    next_id: AtomicU64,
}

impl Readiness {
    /// Start in `NotReady` with no listeners
    pub fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Current state
    pub fn state(&self) -> ReadyState {
        if self.is_ready() {
            ReadyState::Ready
        } else {
            ReadyState::NotReady
        }
    }

    /// Check whether the transition to `Ready` has happened
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Register a listener for the readiness broadcast.
    ///
    /// Registering after the broadcast does not notify; the listener has to
    /// ask with [`request_ready`](Self::request_ready).
    pub fn register(&self, name: &str, listener: Arc<dyn ReadyListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push(Registration {
            id,
            name: name.to_string(),
            listener,
        });
        debug!(target: "edidmap::protocol", %id, name, "listener registered");
        id
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Name a listener registered with
    pub fn listener_name(&self, id: ListenerId) -> Option<String> {
        self.listeners
            .lock()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.clone())
    }

    /// Transition to `Ready` and broadcast.
    ///
    /// Returns the number of listeners notified, or `None` if the index was
    /// already ready (nothing is broadcast twice).
    pub fn mark_ready(&self) -> Option<usize> {
        let targets: Vec<Arc<dyn ReadyListener>> = {
            let listeners = self.listeners.lock();
            if self.ready.swap(true, Ordering::AcqRel) {
                return None;
            }
            listeners.iter().map(|r| Arc::clone(&r.listener)).collect()
        };
        for listener in &targets {
            listener.on_ready();
        }
        Some(targets.len())
    }

    /// Replay the readiness notification to one listener.
    ///
    /// Returns false, without notifying anyone, if not ready yet or if `id`
    /// is not registered.
    pub fn request_ready(&self, id: ListenerId) -> bool {
        if !self.is_ready() {
            debug!(target: "edidmap::protocol", %id, "ready requested before ready; ignored");
            return false;
        }
        let target = self
            .listeners
            .lock()
            .iter()
            .find(|r| r.id == id)
            .map(|r| Arc::clone(&r.listener));
        match target {
            Some(listener) => {
                debug!(target: "edidmap::protocol", %id, "replaying ready");
                listener.on_ready();
                true
            }
            None => false,
        }
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Readiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Readiness")
            .field("state", &self.state())
            .field("listener_count", &self.listener_count())
            .finish()
    }
}
