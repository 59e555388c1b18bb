//! Accent colour schemes.
//!
//! A [`Scheme`] is the accent axis of the appearance, independent of
//! [`Mode`]. The set is closed: anything that is not one of the four variants
//! is rejected by [`FromStr`], so an unknown name can never reach storage or
//! the document root.
//!
//! Each scheme also carries its palette: the picker swatch, a glow accent
//! that shifts with the mode, and a three-stop gradient.
//!
//! ```rust
//! use folio_appearance::{Mode, Scheme};
//!
//! let scheme: Scheme = "purple".parse().unwrap();
//! assert_eq!(scheme.label(), "Purple");
//! assert_eq!(scheme.accent(Mode::Dark).to_string(), "#8b5cf6");
//! assert!("neon".parse::<Scheme>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppearanceError;
use crate::mode::Mode;
use crate::rgb::Rgb;

/// The accent colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Sky,
    Purple,
    Orange,
    Green,
}

impl Scheme {
    /// Every scheme, in picker order.
    pub const ALL: [Scheme; 4] = [Scheme::Sky, Scheme::Purple, Scheme::Orange, Scheme::Green];

    /// The persisted and reflected string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Sky => "sky",
            Scheme::Purple => "purple",
            Scheme::Orange => "orange",
            Scheme::Green => "green",
        }
    }

    /// Human-readable name for pickers.
    pub fn label(self) -> &'static str {
        match self {
            Scheme::Sky => "Sky",
            Scheme::Purple => "Purple",
            Scheme::Orange => "Orange",
            Scheme::Green => "Green",
        }
    }

    /// The colour shown for this scheme in a picker.
    pub fn swatch(self) -> Rgb {
        match self {
            Scheme::Sky => Rgb::from_hex(0x0ea5e9),
            Scheme::Purple => Rgb::from_hex(0xa855f7),
            Scheme::Orange => Rgb::from_hex(0xf97316),
            Scheme::Green => Rgb::from_hex(0x22c55e),
        }
    }

    /// Glow accent for the given mode. Dark mode uses a deeper shade.
    pub fn accent(self, mode: Mode) -> Rgb {
        match (self, mode) {
            (Scheme::Sky, Mode::Light) => Rgb::from_hex(0x0ea5e9),
            (Scheme::Sky, Mode::Dark) => Rgb::from_hex(0x3b82f6),
            (Scheme::Purple, Mode::Light) => Rgb::from_hex(0xa855f7),
            (Scheme::Purple, Mode::Dark) => Rgb::from_hex(0x8b5cf6),
            (Scheme::Orange, Mode::Light) => Rgb::from_hex(0xf97316),
            (Scheme::Orange, Mode::Dark) => Rgb::from_hex(0xea580c),
            (Scheme::Green, Mode::Light) => Rgb::from_hex(0x22c55e),
            (Scheme::Green, Mode::Dark) => Rgb::from_hex(0x16a34a),
        }
    }

    /// Gradient stops, lightest first.
    pub fn gradient(self) -> [Rgb; 3] {
        match self {
            Scheme::Sky => [
                Rgb::from_hex(0x0ea5e9),
                Rgb::from_hex(0x3b82f6),
                Rgb::from_hex(0x1d4ed8),
            ],
            Scheme::Purple => [
                Rgb::from_hex(0xa855f7),
                Rgb::from_hex(0x8b5cf6),
                Rgb::from_hex(0x7c3aed),
            ],
            Scheme::Orange => [
                Rgb::from_hex(0xf97316),
                Rgb::from_hex(0xea580c),
                Rgb::from_hex(0xdc2626),
            ],
            Scheme::Green => [
                Rgb::from_hex(0x22c55e),
                Rgb::from_hex(0x16a34a),
                Rgb::from_hex(0x15803d),
            ],
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = AppearanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == name)
            .ok_or_else(|| AppearanceError::UnknownScheme(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_scheme() {
        for scheme in Scheme::ALL {
            assert_eq!(scheme.as_str().parse::<Scheme>().unwrap(), scheme);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "neon".parse::<Scheme>().unwrap_err(),
            AppearanceError::UnknownScheme("neon".to_string())
        );
        assert!("".parse::<Scheme>().is_err());
        assert!("Sky".parse::<Scheme>().is_err());
    }

    #[test]
    fn test_default_is_sky() {
        assert_eq!(Scheme::default(), Scheme::Sky);
    }

    #[test]
    fn test_swatch_matches_light_accent() {
        for scheme in Scheme::ALL {
            assert_eq!(scheme.swatch(), scheme.accent(Mode::Light));
        }
    }

    #[test]
    fn test_dark_accent_differs_from_light() {
        for scheme in Scheme::ALL {
            assert_ne!(scheme.accent(Mode::Light), scheme.accent(Mode::Dark));
        }
    }

    #[test]
    fn test_gradient_starts_at_swatch() {
        assert_eq!(Scheme::Orange.gradient()[0].to_string(), "#f97316");
        assert_eq!(Scheme::Green.gradient()[2].to_string(), "#15803d");
        for scheme in Scheme::ALL {
            assert_eq!(scheme.gradient()[0], scheme.swatch());
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Scheme::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
        let back: Scheme = serde_json::from_str("\"green\"").unwrap();
        assert_eq!(back, Scheme::Green);
        assert!(serde_json::from_str::<Scheme>("\"neon\"").is_err());
    }
}
