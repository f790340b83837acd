//! Listener registry keyed by event kind.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, Weak};

/// Change notifications the backend pushes. Names outside this set are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    TicketUpdated,
    KnowledgeUpdated,
    SpecUpdated,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::TicketUpdated,
        EventKind::KnowledgeUpdated,
        EventKind::SpecUpdated,
    ];

    /// Wire name, as sent on the `event:` line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TicketUpdated => "ticket-updated",
            Self::KnowledgeUpdated => "knowledge-updated",
            Self::SpecUpdated => "spec-updated",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-argument notification callback.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Slots {
    next_id: u64,
    by_kind: HashMap<EventKind, BTreeMap<u64, Listener>>,
}

/// Shared listener table. Ids are unique per registry, so one listener is
/// called at most once per frame.
#[derive(Default)]
pub(crate) struct Registry {
    slots: Mutex<Slots>,
}

impl Registry {
    pub(crate) fn add(self: &Arc<Self>, kind: EventKind, listener: Listener) -> Subscription {
        let id = match self.slots.lock() {
            Ok(mut slots) => {
                let id = slots.next_id;
                slots.next_id += 1;
                slots.by_kind.entry(kind).or_default().insert(id, listener);
                id
            }
            Err(_) => u64::MAX,
        };
        Subscription {
            registry: Arc::downgrade(self),
            kind,
            id,
        }
    }

    fn remove(&self, kind: EventKind, id: u64) {
        if let Ok(mut slots) = self.slots.lock() {
            if let Some(listeners) = slots.by_kind.get_mut(&kind) {
                listeners.remove(&id);
            }
        }
    }

    /// Call every listener of `kind`; returns how many were called.
    ///
    /// Listeners run outside the lock so they may subscribe or dispose.
    pub(crate) fn dispatch(&self, kind: EventKind) -> usize {
        let listeners: Vec<Listener> = match self.slots.lock() {
            Ok(slots) => slots
                .by_kind
                .get(&kind)
                .map(|listeners| listeners.values().cloned().collect())
                .unwrap_or_default(),
            Err(_) => return 0,
        };
        for listener in &listeners {
            listener();
        }
        listeners.len()
    }

    pub(crate) fn clear(&self) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.by_kind.clear();
        }
    }

    pub(crate) fn len(&self, kind: EventKind) -> usize {
        self.slots
            .lock()
            .map(|slots| slots.by_kind.get(&kind).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }
}

/// Handle to one registered listener.
///
/// Dropping the handle keeps the listener; call [`Subscription::dispose`] to
/// remove it. Disposing after the client is gone is a no-op.
#[must_use = "keep the subscription to be able to dispose it"]
pub struct Subscription {
    registry: Weak<Registry>,
    kind: EventKind,
    id: u64,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn dispose(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.kind, self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}
