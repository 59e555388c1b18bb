//! The appearance store.
//!
//! [`AppearanceStore`] is the single owner of the `{mode, scheme}` pair. It
//! is constructed once, usually wrapped in an `Arc`, and handed to every
//! consumer explicitly. Consumers read with [`state`](AppearanceStore::state),
//! change the pair only through [`toggle_mode`](AppearanceStore::toggle_mode)
//! and [`set_scheme`](AppearanceStore::set_scheme), and react to changes with
//! [`subscribe`](AppearanceStore::subscribe).
//!
//! Every mutation runs the same commit sequence:
//!
//! 1. compute the next state
//! 2. persist both keys in one write (failures are logged, not returned)
//! 3. apply both root attributes
//! 4. publish the state to readers
//! 5. notify subscribers, in registration order, with the same value
//!
//! Steps 1 to 4 run under an internal lock that serialises mutations.
//! Notification happens after that lock is released, from a queue that
//! delivers states in commit order, one round at a time. A subscriber may
//! therefore call `state()` or any mutator from inside its callback. A
//! mutation made there commits at once and returns its state; its own
//! notification round starts after the current one finishes.
//!
//! ```rust
//! use folio_appearance::{AppearanceStore, FixedPreference, MemoryStorage, Mode, RootElement, Scheme};
//!
//! let storage = MemoryStorage::new();
//! let root = RootElement::new();
//! let store = AppearanceStore::open(storage.clone(), root.clone(), &FixedPreference::new(Mode::Light));
//!
//! store.toggle_mode();
//! store.set_scheme(Scheme::Purple);
//! assert!(store.set_scheme_named("neon").is_err());
//!
//! assert_eq!(store.state().mode, Mode::Dark);
//! assert_eq!(store.state().scheme, Scheme::Purple);
//! assert_eq!(storage.get("theme").as_deref(), Some("dark"));
//! assert_eq!(root.opening_tag(), r#"<html data-color-scheme="purple" data-theme="dark">"#);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::thread;

use tracing::{debug, warn};

use crate::document::{self, DocumentRoot, RootElement, SCHEME_ATTR, THEME_ATTR};
use crate::error::AppearanceError;
use crate::mode::{Mode, OsPreference, SystemPreference};
use crate::scheme::Scheme;
use crate::state::AppearanceState;
use crate::storage::{MemoryStorage, PreferenceStorage, MODE_KEY, SCHEME_KEY};
use crate::subscription::{self, SharedRegistry, Subscription};

/// Where the store writes to. Guarded by one lock, which also serialises
/// mutations.
struct Backend {
    storage: Box<dyn PreferenceStorage>,
    root: Box<dyn DocumentRoot>,
}

impl Backend {
    fn commit(&mut self, state: &AppearanceState) {
        persist(&mut *self.storage, state);
        document::apply(&mut *self.root, state);
        debug!(mode = %state.mode, scheme = %state.scheme, "appearance applied");
    }
}

/// Committed states waiting to be handed to subscribers.
#[derive(Default)]
struct Outbox {
    queue: VecDeque<AppearanceState>,
    delivering: bool,
}

/// Clears the delivering flag if a callback panics mid-round, so later
/// mutations still notify.
struct DeliveryGuard<'a>(&'a Mutex<Outbox>);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            let mut outbox = self.0.lock().unwrap_or_else(|e| e.into_inner());
            outbox.delivering = false;
        }
    }
}

/// Single source of truth for the light/dark mode and accent scheme.
pub struct AppearanceStore {
    state: RwLock<AppearanceState>,
    backend: Mutex<Backend>,
    outbox: Mutex<Outbox>,
    subscribers: SharedRegistry,
}

impl AppearanceStore {
    /// Creates a builder with in-memory storage, a fresh [`RootElement`] and
    /// OS preference detection.
    pub fn builder() -> AppearanceStoreBuilder {
        AppearanceStoreBuilder::new()
    }

    /// Restores the appearance from `storage`, applies it to `root`, and
    /// persists it back.
    ///
    /// A stored mode wins; otherwise `preference` decides; otherwise light.
    /// A stored scheme wins; otherwise sky. Unreadable storage and invalid
    /// stored values are logged and treated as absent.
    pub fn open<S, R>(storage: S, root: R, preference: &dyn SystemPreference) -> Self
    where
        S: PreferenceStorage + 'static,
        R: DocumentRoot + 'static,
    {
        Self::open_boxed(Box::new(storage), Box::new(root), preference)
    }

    fn open_boxed(
        storage: Box<dyn PreferenceStorage>,
        root: Box<dyn DocumentRoot>,
        preference: &dyn SystemPreference,
    ) -> Self {
        let mode = read_stored::<Mode>(&*storage, MODE_KEY)
            .or_else(|| preference.detect())
            .unwrap_or_default();
        let scheme = read_stored::<Scheme>(&*storage, SCHEME_KEY).unwrap_or_default();
        let state = AppearanceState::new(mode, scheme);

        let mut backend = Backend { storage, root };
        backend.commit(&state);

        Self {
            state: RwLock::new(state),
            backend: Mutex::new(backend),
            outbox: Mutex::default(),
            subscribers: SharedRegistry::default(),
        }
    }

    /// The current `{mode, scheme}` pair.
    pub fn state(&self) -> AppearanceState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn mode(&self) -> Mode {
        self.state().mode
    }

    pub fn scheme(&self) -> Scheme {
        self.state().scheme
    }

    pub fn is_dark(&self) -> bool {
        self.state().is_dark()
    }

    /// Flips between light and dark and returns the new state.
    pub fn toggle_mode(&self) -> AppearanceState {
        self.update(|state| state.with_mode(state.mode.toggled()))
    }

    /// Switches the accent scheme and returns the new state.
    pub fn set_scheme(&self, scheme: Scheme) -> AppearanceState {
        self.update(|state| state.with_scheme(scheme))
    }

    /// Switches the accent scheme by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppearanceError::UnknownScheme`] if `name` is not one of the
    /// known schemes. Nothing is written, applied or notified in that case.
    pub fn set_scheme_named(&self, name: &str) -> Result<AppearanceState, AppearanceError> {
        match Scheme::from_str(name) {
            Ok(scheme) => Ok(self.set_scheme(scheme)),
            Err(err) => {
                debug!(error = %err, "rejected scheme change");
                Err(err)
            }
        }
    }

    /// Registers `callback` to run after every mutation.
    ///
    /// The callback receives the state the mutation produced. It stays
    /// registered until the returned [`Subscription`] is dropped.
    ///
    /// Callbacks may read or mutate the store. A mutation made from a
    /// callback is notified after every subscriber has seen the current
    /// state.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AppearanceState) + Send + Sync + 'static,
    {
        let id = subscription::lock(&self.subscribers).insert(Arc::new(callback));
        Subscription::new(id, &self.subscribers)
    }

    pub fn subscriber_count(&self) -> usize {
        subscription::lock(&self.subscribers).len()
    }

    /// The root attributes the current state maps to.
    pub fn root_attributes(&self) -> [(&'static str, &'static str); 2] {
        let state = self.state();
        [
            (THEME_ATTR, state.mode.as_str()),
            (SCHEME_ATTR, state.scheme.as_str()),
        ]
    }

    fn update(&self, change: impl FnOnce(AppearanceState) -> AppearanceState) -> AppearanceState {
        let next = {
            let mut backend = self.lock_backend();
            let next = change(self.state());
            backend.commit(&next);
            *self.state.write().unwrap_or_else(|e| e.into_inner()) = next;
            // Queued before the backend lock is released, so queue order is
            // commit order.
            self.lock_outbox().queue.push_back(next);
            next
        };

        self.deliver();
        next
    }

    /// Drains the outbox unless another call is already draining it, in
    /// which case that call delivers what was queued here.
    fn deliver(&self) {
        {
            let mut outbox = self.lock_outbox();
            if outbox.delivering {
                return;
            }
            outbox.delivering = true;
        }
        let _guard = DeliveryGuard(&self.outbox);

        loop {
            let state = {
                let mut outbox = self.lock_outbox();
                match outbox.queue.pop_front() {
                    Some(state) => state,
                    None => {
                        outbox.delivering = false;
                        return;
                    }
                }
            };

            let callbacks = subscription::lock(&self.subscribers).snapshot();
            for callback in callbacks {
                callback(&state);
            }
        }
    }

    fn lock_backend(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_outbox(&self) -> MutexGuard<'_, Outbox> {
        self.outbox.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for AppearanceStore {
    fn default() -> Self {
        Self::builder().open()
    }
}

impl fmt::Debug for AppearanceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppearanceStore")
            .field("state", &self.state())
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// Builder for [`AppearanceStore`].
///
/// ```rust
/// use folio_appearance::{AppearanceStore, FixedPreference, Mode};
///
/// let store = AppearanceStore::builder()
///     .preference(FixedPreference::new(Mode::Dark))
///     .open();
/// assert!(store.is_dark());
/// ```
pub struct AppearanceStoreBuilder {
    storage: Box<dyn PreferenceStorage>,
    root: Box<dyn DocumentRoot>,
    preference: Box<dyn SystemPreference>,
}

impl AppearanceStoreBuilder {
    pub fn new() -> Self {
        Self {
            storage: Box::new(MemoryStorage::new()),
            root: Box::new(RootElement::new()),
            preference: Box::new(OsPreference),
        }
    }

    pub fn storage(mut self, storage: impl PreferenceStorage + 'static) -> Self {
        self.storage = Box::new(storage);
        self
    }

    pub fn root(mut self, root: impl DocumentRoot + 'static) -> Self {
        self.root = Box::new(root);
        self
    }

    pub fn preference(mut self, preference: impl SystemPreference + 'static) -> Self {
        self.preference = Box::new(preference);
        self
    }

    /// Runs initialization and returns the store.
    pub fn open(self) -> AppearanceStore {
        AppearanceStore::open_boxed(self.storage, self.root, &*self.preference)
    }

    /// Same as [`open`](Self::open), wrapped for sharing between consumers.
    pub fn open_shared(self) -> Arc<AppearanceStore> {
        Arc::new(self.open())
    }
}

impl Default for AppearanceStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn read_stored<T>(storage: &dyn PreferenceStorage, key: &str) -> Option<T>
where
    T: FromStr<Err = AppearanceError>,
{
    match storage.read(key) {
        Ok(Some(raw)) => match raw.parse() {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "ignoring invalid stored preference");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(key, error = %err, "failed to read stored preference");
            None
        }
    }
}

fn persist(storage: &mut dyn PreferenceStorage, state: &AppearanceState) {
    let entries = [
        (MODE_KEY, state.mode.as_str()),
        (SCHEME_KEY, state.scheme.as_str()),
    ];
    if let Err(err) = storage.write_all(&entries) {
        warn!(error = %err, "failed to persist appearance preferences");
    }
}
