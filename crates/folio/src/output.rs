//! Terminal output: styled text for humans, JSON for scripts.
//!
//! `console` decides whether colour is emitted (it honours `NO_COLOR` and
//! turns styling off when stdout is not a terminal).

use console::{style, Style};
use folio_appearance::{AppearanceState, Mode, Rgb, Scheme};
use serde::Serialize;
use serde_json::{json, Value as JsonValue};

const SWATCH: &str = "██";

fn swatch(color: Rgb) -> String {
    Style::new()
        .color256(color.to_ansi256())
        .apply_to(SWATCH)
        .to_string()
}

fn row(label: &str, value: impl std::fmt::Display) -> String {
    format!("{} {}\n", style(format!("{:<8}", label)).dim(), value)
}

/// Text block describing a state.
pub fn state_text(state: &AppearanceState) -> String {
    let accent = state.accent();
    let mut out = String::new();
    out.push_str(&row("mode", style(state.mode).bold()));
    out.push_str(&row("scheme", style(state.scheme).bold()));
    out.push_str(&row("accent", format!("{} {}", swatch(accent), accent)));
    out
}

pub fn state_json(state: &AppearanceState) -> JsonValue {
    json!({
        "mode": state.mode,
        "scheme": state.scheme,
        "accent": state.accent().to_string(),
    })
}

#[derive(Debug, Serialize)]
struct SchemeEntry {
    name: Scheme,
    label: &'static str,
    swatch: String,
    accent_light: String,
    accent_dark: String,
    gradient: Vec<String>,
    current: bool,
}

/// Listing of every scheme, marking `current`.
pub fn schemes_text(current: Scheme) -> String {
    let mut out = String::new();
    for scheme in Scheme::ALL {
        let marker = if scheme == current { "*" } else { " " };
        let line = format!(
            "{} {} {:<7} {}\n",
            marker,
            swatch(scheme.swatch()),
            scheme.as_str(),
            scheme.label()
        );
        if scheme == current {
            out.push_str(&style(line).bold().to_string());
        } else {
            out.push_str(&line);
        }
    }
    out
}

pub fn schemes_json(current: Scheme) -> JsonValue {
    let entries: Vec<SchemeEntry> = Scheme::ALL
        .into_iter()
        .map(|scheme| SchemeEntry {
            name: scheme,
            label: scheme.label(),
            swatch: scheme.swatch().to_string(),
            accent_light: scheme.accent(Mode::Light).to_string(),
            accent_dark: scheme.accent(Mode::Dark).to_string(),
            gradient: scheme.gradient().iter().map(Rgb::to_string).collect(),
            current: scheme == current,
        })
        .collect();
    json!(entries)
}

pub fn attributes_json(attributes: &[(String, String)]) -> JsonValue {
    let map: serde_json::Map<String, JsonValue> = attributes
        .iter()
        .map(|(name, value)| (name.clone(), JsonValue::String(value.clone())))
        .collect();
    JsonValue::Object(map)
}
