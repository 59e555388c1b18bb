//! Light/dark mode and system preference detection.
//!
//! [`Mode`] is the light/dark axis of the appearance. When nothing has been
//! persisted yet, the store asks a [`SystemPreference`] for the user's OS
//! setting. [`OsPreference`] queries the OS through `dark-light`;
//! [`FixedPreference`] answers with a fixed value and is what tests inject.
//!
//! ```rust
//! use folio_appearance::{FixedPreference, Mode, SystemPreference};
//!
//! let preference = FixedPreference::new(Mode::Dark);
//! assert_eq!(preference.detect(), Some(Mode::Dark));
//! assert_eq!(Mode::Dark.toggled(), Mode::Light);
//! ```

use std::fmt;
use std::str::FromStr;

use dark_light::Mode as OsMode;
use serde::{Deserialize, Serialize};

use crate::error::AppearanceError;

/// The user's light/dark mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Light background, dark text.
    #[default]
    Light,
    /// Dark background, light text.
    Dark,
}

impl Mode {
    /// Both modes, light first.
    pub const ALL: [Mode; 2] = [Mode::Light, Mode::Dark];

    /// The persisted and reflected string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }

    /// The opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Mode::Dark)
    }

    pub fn is_light(self) -> bool {
        matches!(self, Mode::Light)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = AppearanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Mode::Light),
            "dark" => Ok(Mode::Dark),
            other => Err(AppearanceError::UnknownMode(other.to_string())),
        }
    }
}

/// Source of the user's system-level light/dark preference.
///
/// Returns `None` when the platform cannot say, in which case the store
/// falls back to [`Mode::Light`].
pub trait SystemPreference: Send + Sync {
    fn detect(&self) -> Option<Mode>;
}

/// Queries the OS colour scheme through the `dark-light` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsPreference;

impl SystemPreference for OsPreference {
    fn detect(&self) -> Option<Mode> {
        match dark_light::detect() {
            Ok(OsMode::Dark) => Some(Mode::Dark),
            Ok(OsMode::Light) => Some(Mode::Light),
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(error = %err, "system color scheme detection failed");
                None
            }
        }
    }
}

/// A preference that always reports the same answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedPreference(Option<Mode>);

impl FixedPreference {
    pub fn new(mode: Mode) -> Self {
        Self(Some(mode))
    }

    /// A platform with no detectable preference.
    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl SystemPreference for FixedPreference {
    fn detect(&self) -> Option<Mode> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_flips() {
        assert_eq!(Mode::Light.toggled(), Mode::Dark);
        assert_eq!(Mode::Dark.toggled(), Mode::Light);
        assert_eq!(Mode::Dark.toggled().toggled(), Mode::Dark);
    }

    #[test]
    fn test_predicates() {
        assert!(Mode::Dark.is_dark());
        assert!(!Mode::Dark.is_light());
        assert!(Mode::Light.is_light());
        assert!(!Mode::Light.is_dark());
    }

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("light".parse::<Mode>().unwrap(), Mode::Light);
        assert_eq!("dark".parse::<Mode>().unwrap(), Mode::Dark);
        assert_eq!(" dark\n".parse::<Mode>().unwrap(), Mode::Dark);
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        let err = "dim".parse::<Mode>().unwrap_err();
        assert_eq!(err, AppearanceError::UnknownMode("dim".to_string()));

        // Case matters: only the persisted lowercase form is accepted.
        assert!("Dark".parse::<Mode>().is_err());
    }

    #[test]
    fn test_display_matches_as_str() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string(), mode.as_str());
        }
    }

    #[test]
    fn test_fixed_preference() {
        assert_eq!(FixedPreference::new(Mode::Dark).detect(), Some(Mode::Dark));
        assert_eq!(FixedPreference::unavailable().detect(), None);
    }

    #[test]
    fn test_os_preference_does_not_panic() {
        // Result depends on the host; only the call itself is checked.
        let _ = OsPreference.detect();
    }
}
