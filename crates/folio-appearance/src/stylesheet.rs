//! CSS keyed on the root attributes.
//!
//! One rule per `(mode, scheme)` pair, selecting on [`THEME_ATTR`] and
//! [`SCHEME_ATTR`] and defining custom properties that page styles can use:
//!
//! ```css
//! :root[data-theme="dark"][data-color-scheme="sky"] {
//!   --accent: #3b82f6;
//!   --swatch: #0ea5e9;
//!   --gradient-from: #0ea5e9;
//!   --gradient-via: #3b82f6;
//!   --gradient-to: #1d4ed8;
//! }
//! ```

use std::fmt::Write;

use crate::document::{SCHEME_ATTR, THEME_ATTR};
use crate::mode::Mode;
use crate::scheme::Scheme;

/// The selector matching a root carrying `mode` and `scheme`.
pub fn selector(mode: Mode, scheme: Scheme) -> String {
    format!(
        ":root[{}=\"{}\"][{}=\"{}\"]",
        THEME_ATTR, mode, SCHEME_ATTR, scheme
    )
}

/// The rule for a single combination.
pub fn rule(mode: Mode, scheme: Scheme) -> String {
    let [from, via, to] = scheme.gradient();
    let mut css = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(css, "{} {{", selector(mode, scheme));
    let _ = writeln!(css, "  --accent: {};", scheme.accent(mode));
    let _ = writeln!(css, "  --swatch: {};", scheme.swatch());
    let _ = writeln!(css, "  --gradient-from: {};", from);
    let _ = writeln!(css, "  --gradient-via: {};", via);
    let _ = writeln!(css, "  --gradient-to: {};", to);
    css.push_str("}\n");
    css
}

/// Rules for every combination, modes outermost, separated by blank lines.
pub fn stylesheet() -> String {
    Mode::ALL
        .into_iter()
        .flat_map(|mode| Scheme::ALL.into_iter().map(move |scheme| rule(mode, scheme)))
        .collect::<Vec<_>>()
        .join("\n")
}
