//! Change notification bus.
//!
//! Components register observer callbacks and receive every event sent on the
//! bus; each callback filters for the kinds it cares about. Registrations are
//! identified by an opaque [`ObserverId`] token so an observer can be revoked
//! at teardown without the bus holding a back-pointer into widget memory.
//!
//! The bus is synchronous and single-threaded: `send` runs every callback
//! inline on the caller's stack, in registration order, before returning.
//! Observers mark state dirty; they never render.

use anyhow::Result;
use tracing::{debug, error};

/// Kinds of change events delivered on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    /// The index view changed (selection, sort, mailbox contents).
    Index,
    /// Mailbox state changed (new mail, flags).
    Mailbox,
    /// A configuration option changed.
    Config,
    /// Window geometry or visibility changed.
    Window,
}

/// A change event delivered to every registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyEvent {
    pub kind: NotifyKind,
}

impl NotifyEvent {
    pub fn new(kind: NotifyKind) -> Self {
        Self { kind }
    }
}

/// Opaque registration token returned by [`Notify::register`].
pub type ObserverId = u64;

/// An observer callback. Returns an error only for programming bugs
/// (e.g. a dangling registration), never for irrelevant events.
pub type ObserverFn = Box<dyn FnMut(&NotifyEvent) -> Result<()>>;

struct Registration {
    id: ObserverId,
    callback: ObserverFn,
}

/// The notification bus.
///
/// Owned by the shared application state; widgets register at construction
/// and unregister in their teardown path.
#[derive(Default)]
pub struct Notify {
    next_id: ObserverId,
    observers: Vec<Registration>,
}

impl Notify {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer callback and returns its revocation token.
    ///
    /// Callbacks see every event on the bus regardless of kind; kind
    /// filtering is the callback's job.
    pub fn register(&mut self, callback: ObserverFn) -> ObserverId {
        let id = self.next_id;
        self.next_id += 1;
        self.observers.push(Registration { id, callback });
        debug!(observer = id, "observer registered");
        id
    }

    /// Removes a registration. Returns false if the token was already revoked.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|reg| reg.id != id);
        let removed = self.observers.len() != before;
        if removed {
            debug!(observer = id, "observer unregistered");
        }
        removed
    }

    /// Number of live registrations.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Delivers an event to every registered observer, in registration order.
    ///
    /// Delivery continues past failing observers so one broken registration
    /// cannot starve the rest; the first failure is returned after the full
    /// sweep.
    ///
    /// # Errors
    /// Returns the first observer error. An observer error indicates a
    /// programming bug (e.g. a dangling registration), not a transient
    /// condition.
    pub fn send(&mut self, event: &NotifyEvent) -> Result<()> {
        let mut first_failure = None;
        for reg in &mut self.observers {
            if let Err(e) = (reg.callback)(event) {
                error!(observer = reg.id, kind = ?event.kind, "observer failed: {e:#}");
                first_failure.get_or_insert((reg.id, e));
            }
        }
        match first_failure {
            None => Ok(()),
            Some((id, e)) => Err(e.context(format!("observer {id} rejected event"))),
        }
    }
}
