//! Reflection of the appearance onto a document root.
//!
//! Styling never reads the store. It reads two attributes on the root
//! element, [`THEME_ATTR`] and [`SCHEME_ATTR`], which the store keeps equal
//! to its state. [`DocumentRoot`] is the seam the store writes through;
//! [`RootElement`] is an attribute map that renders as an `<html>` opening
//! tag.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::state::AppearanceState;

/// Root attribute carrying the mode.
pub const THEME_ATTR: &str = "data-theme";

/// Root attribute carrying the scheme.
pub const SCHEME_ATTR: &str = "data-color-scheme";

/// Something with settable attributes that styling keys off.
pub trait DocumentRoot: Send {
    fn set_attribute(&mut self, name: &str, value: &str);
}

/// Writes both appearance attributes onto `root`.
pub fn apply(root: &mut dyn DocumentRoot, state: &AppearanceState) {
    root.set_attribute(THEME_ATTR, state.mode.as_str());
    root.set_attribute(SCHEME_ATTR, state.scheme.as_str());
}

/// An `<html>` root element held as an ordered attribute map.
///
/// Clones share the same attributes, so a caller can hand one clone to the
/// store and keep another to inspect what was applied.
#[derive(Debug, Clone, Default)]
pub struct RootElement {
    attributes: Arc<RwLock<BTreeMap<String, String>>>,
}

impl RootElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.read().get(name).cloned()
    }

    /// All attributes, sorted by name.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// The opening tag, e.g. `<html data-color-scheme="sky" data-theme="dark">`.
    pub fn opening_tag(&self) -> String {
        self.to_string()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, String>> {
        self.attributes.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl DocumentRoot for RootElement {
    fn set_attribute(&mut self, name: &str, value: &str) {
        let mut attributes = self.attributes.write().unwrap_or_else(|e| e.into_inner());
        attributes.insert(name.to_string(), value.to_string());
    }
}

impl fmt::Display for RootElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<html")?;
        for (name, value) in self.read().iter() {
            write!(f, " {}=\"{}\"", name, escape_attribute(value))?;
        }
        f.write_str(">")
    }
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mode, Scheme};

    #[test]
    fn test_empty_root_tag() {
        assert_eq!(RootElement::new().opening_tag(), "<html>");
    }

    #[test]
    fn test_apply_sets_both_attributes() {
        let mut root = RootElement::new();
        apply(&mut root, &AppearanceState::new(Mode::Dark, Scheme::Orange));

        assert_eq!(root.attribute(THEME_ATTR).as_deref(), Some("dark"));
        assert_eq!(root.attribute(SCHEME_ATTR).as_deref(), Some("orange"));
        assert_eq!(
            root.opening_tag(),
            r#"<html data-color-scheme="orange" data-theme="dark">"#
        );
    }

    #[test]
    fn test_apply_overwrites_previous_values() {
        let mut root = RootElement::new();
        apply(&mut root, &AppearanceState::new(Mode::Dark, Scheme::Orange));
        apply(&mut root, &AppearanceState::new(Mode::Light, Scheme::Sky));

        assert_eq!(root.attributes().len(), 2);
        assert_eq!(root.attribute(THEME_ATTR).as_deref(), Some("light"));
    }

    #[test]
    fn test_clones_share_attributes() {
        let handle = RootElement::new();
        let mut writer = handle.clone();
        writer.set_attribute("lang", "en");
        assert_eq!(handle.attribute("lang").as_deref(), Some("en"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut root = RootElement::new();
        root.set_attribute("title", r#"a "b" <c> & d"#);
        assert_eq!(
            root.opening_tag(),
            r#"<html title="a &quot;b&quot; &lt;c&gt; &amp; d">"#
        );
    }
}
