//! RGB colour triplets for palette entries.

use std::fmt;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Builds a colour from a packed `0xRRGGBB` value.
    pub const fn from_hex(value: u32) -> Self {
        Rgb(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    /// Nearest entry in the xterm 256-colour palette.
    ///
    /// Greys map onto the 24-step grey ramp (`8 + 10n`); everything else
    /// onto the cube, each channel rounded to the closest cube level.
    pub fn to_ansi256(self) -> u8 {
        let Rgb(r, g, b) = self;
        if r == g && g == b {
            if r < 4 {
                16
            } else if r > 246 {
                231
            } else {
                232 + ((r - 3) / 10).min(23)
            }
        } else {
            16 + 36 * cube_index(r) + 6 * cube_index(g) + cube_index(b)
        }
    }
}

/// Index of the closest cube level (0, 95, 135, 175, 215, 255).
/// Midpoints round up.
fn cube_index(value: u8) -> u8 {
    match value {
        0..=47 => 0,
        48..=114 => 1,
        _ => (value - 35) / 40,
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}
