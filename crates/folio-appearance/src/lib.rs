//! # folio-appearance
//!
//! Persisted light/dark mode and accent colour scheme, shared by every part
//! of an application that needs to look consistent.
//!
//! ## Core Concepts
//!
//! - [`AppearanceStore`]: single owner of the current [`AppearanceState`].
//!   Build one at startup and pass it (usually as `Arc<AppearanceStore>`) to
//!   every consumer.
//! - [`Mode`]: light or dark. [`Scheme`]: sky, purple, orange or green.
//! - [`PreferenceStorage`]: where the two values survive restarts.
//!   [`FileStorage`] keeps them in a YAML file, [`MemoryStorage`] in memory.
//! - [`DocumentRoot`]: receives the `data-theme` and `data-color-scheme`
//!   attributes that styling keys off. [`RootElement`] renders them as an
//!   `<html>` tag.
//! - [`SystemPreference`]: the OS light/dark setting used when nothing has
//!   been stored yet.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use folio_appearance::{AppearanceStore, FixedPreference, Mode, Scheme};
//!
//! let store = AppearanceStore::builder()
//!     .preference(FixedPreference::new(Mode::Light))
//!     .open_shared();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let _subscription = store.subscribe(move |state| sink.lock().unwrap().push(*state));
//!
//! store.toggle_mode();
//! store.set_scheme(Scheme::Green);
//!
//! assert_eq!(seen.lock().unwrap().len(), 2);
//! assert!(store.state().is_dark());
//! ```
//!
//! ## Failure Handling
//!
//! Appearance is an enhancement, so storage problems never fail the store:
//! unreadable or invalid stored values fall back to defaults and failed
//! writes are logged through `tracing`. The only error a caller sees is
//! [`AppearanceError`] for input outside the known values.

mod document;
mod error;
mod mode;
mod rgb;
mod scheme;
mod state;
mod storage;
mod store;
pub mod stylesheet;
mod subscription;

pub use document::{apply, DocumentRoot, RootElement, SCHEME_ATTR, THEME_ATTR};
pub use error::{AppearanceError, StorageError};
pub use mode::{FixedPreference, Mode, OsPreference, SystemPreference};
pub use rgb::Rgb;
pub use scheme::Scheme;
pub use state::AppearanceState;
pub use storage::{
    FileStorage, MemoryStorage, PreferenceStorage, CONFIG_DIR_NAME, FILE_NAME, MODE_KEY,
    SCHEME_KEY,
};
pub use store::{AppearanceStore, AppearanceStoreBuilder};
pub use subscription::Subscription;
