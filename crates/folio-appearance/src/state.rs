//! The `{mode, scheme}` pair every consumer observes.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::rgb::Rgb;
use crate::scheme::Scheme;

/// Current appearance: one mode and one scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AppearanceState {
    pub mode: Mode,
    pub scheme: Scheme,
}

impl AppearanceState {
    pub fn new(mode: Mode, scheme: Scheme) -> Self {
        Self { mode, scheme }
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn is_light(&self) -> bool {
        self.mode.is_light()
    }

    /// The scheme's accent resolved for the current mode.
    pub fn accent(&self) -> Rgb {
        self.scheme.accent(self.mode)
    }

    pub(crate) fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }

    pub(crate) fn with_scheme(self, scheme: Scheme) -> Self {
        Self { scheme, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light_sky() {
        let state = AppearanceState::default();
        assert_eq!(state, AppearanceState::new(Mode::Light, Scheme::Sky));
        assert!(state.is_light());
    }

    #[test]
    fn test_accent_follows_mode() {
        let light = AppearanceState::new(Mode::Light, Scheme::Green);
        let dark = light.with_mode(Mode::Dark);
        assert_eq!(light.accent().to_string(), "#22c55e");
        assert_eq!(dark.accent().to_string(), "#16a34a");
        assert!(dark.is_dark());
    }

    #[test]
    fn test_with_scheme_keeps_mode() {
        let state = AppearanceState::new(Mode::Dark, Scheme::Sky).with_scheme(Scheme::Orange);
        assert_eq!(state, AppearanceState::new(Mode::Dark, Scheme::Orange));
    }

    #[test]
    fn test_serializes_flat() {
        let json = serde_json::to_value(AppearanceState::new(Mode::Dark, Scheme::Purple)).unwrap();
        assert_eq!(json, serde_json::json!({ "mode": "dark", "scheme": "purple" }));
    }
}
