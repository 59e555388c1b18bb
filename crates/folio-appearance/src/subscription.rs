//! Change notification for consumers of the store.
//!
//! Subscribing returns a [`Subscription`] guard. The callback stays
//! registered until the guard is dropped or [`Subscription::unsubscribe`] is
//! called. Guards hold only a weak reference to the registry, so an
//! outstanding guard does not keep a dropped store alive.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::state::AppearanceState;

pub(crate) type Callback = Arc<dyn Fn(&AppearanceState) + Send + Sync>;

#[derive(Default)]
pub(crate) struct Registry {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

pub(crate) type SharedRegistry = Arc<Mutex<Registry>>;

pub(crate) fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(|e| e.into_inner())
}

impl Registry {
    pub(crate) fn insert(&mut self, callback: Callback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Callbacks in registration order, cloned so they can run unlocked.
    pub(crate) fn snapshot(&self) -> Vec<Callback> {
        self.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    }
}

/// Registration of a change callback. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes it"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: &SharedRegistry) -> Self {
        Self {
            id,
            registry: Arc::downgrade(registry),
        }
    }

    /// Removes the callback now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}

    /// Whether the store this subscription belongs to still exists.
    pub fn is_active(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).remove(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
