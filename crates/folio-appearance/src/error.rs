//! Error types for the appearance store.
//!
//! Two kinds of failure exist. [`AppearanceError`] is invalid input, such as a
//! scheme name outside the closed set, and is returned to the caller.
//! [`StorageError`] comes from the persistence backend; the store catches and
//! logs it, so it only reaches callers that use a [`PreferenceStorage`]
//! directly.
//!
//! [`PreferenceStorage`]: crate::PreferenceStorage

use std::io;
use std::path::PathBuf;

/// Invalid input handed to the store or to one of the value parsers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppearanceError {
    /// The value is not one of the known modes.
    #[error("unknown mode '{0}' (expected light or dark)")]
    UnknownMode(String),

    /// The value is not one of the known accent schemes.
    #[error("unknown color scheme '{0}' (expected one of: sky, purple, orange, green)")]
    UnknownScheme(String),
}

/// Failure reading or writing persisted preferences.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The preferences file could not be read or written.
    #[error("preferences I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The preferences file exists but is not a flat string map.
    #[error("malformed preferences file {path}: {message}")]
    Format { path: PathBuf, message: String },

    /// The backend cannot be used at all (no config directory, disabled store).
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Format {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
