//! Command handlers. Each one runs against an already-opened store and writes
//! its result to the given sink.

use std::io::Write;

use anyhow::{Context, Result};
use folio_appearance::{stylesheet, AppearanceState, AppearanceStore, RootElement};
use serde_json::Value as JsonValue;

use crate::cli::{Command, OutputFormat};
use crate::output;

/// Where a command's output goes and in which format.
pub struct Sink<'a> {
    pub out: &'a mut dyn Write,
    pub format: OutputFormat,
}

impl Sink<'_> {
    fn emit(&mut self, text: impl FnOnce() -> String, json: impl FnOnce() -> JsonValue) -> Result<()> {
        match self.format {
            OutputFormat::Text => write!(self.out, "{}", text())?,
            OutputFormat::Json => writeln!(self.out, "{}", serde_json::to_string_pretty(&json())?)?,
        }
        Ok(())
    }

    fn state(&mut self, state: &AppearanceState) -> Result<()> {
        self.emit(|| output::state_text(state), || output::state_json(state))
    }
}

pub fn dispatch(
    command: &Command,
    store: &AppearanceStore,
    root: &RootElement,
    sink: &mut Sink<'_>,
) -> Result<()> {
    match command {
        Command::Show => sink.state(&store.state()),
        Command::Toggle => {
            let state = store.toggle_mode();
            sink.state(&state)
        }
        Command::Scheme { name } => {
            let state = store
                .set_scheme_named(name)
                .context("could not change the color scheme")?;
            sink.state(&state)
        }
        Command::Schemes => {
            let current = store.scheme();
            sink.emit(
                || output::schemes_text(current),
                || output::schemes_json(current),
            )
        }
        Command::Root => {
            let attributes = root.attributes();
            sink.emit(
                || format!("{}\n", root.opening_tag()),
                || output::attributes_json(&attributes),
            )
        }
        Command::Css => css(sink),
    }
}

/// Writes the attribute-keyed stylesheet. Format-independent.
pub fn css(sink: &mut Sink<'_>) -> Result<()> {
    write!(sink.out, "{}", stylesheet::stylesheet())?;
    Ok(())
}
