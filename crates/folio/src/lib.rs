//! Command-line front end for the folio appearance store.
//!
//! The binary opens one [`AppearanceStore`] over a YAML preferences file,
//! runs a single command against it, and exits. Everything except argument
//! parsing and logging setup lives here so it can be driven from tests.

pub mod cli;
pub mod commands;
pub mod output;

use std::io::Write;

use anyhow::Result;
use folio_appearance::{
    AppearanceStore, FileStorage, FixedPreference, OsPreference, RootElement,
};
use tracing::warn;

use crate::cli::{Cli, Command};
use crate::commands::Sink;

/// Opens the store the way the CLI flags describe.
///
/// An explicit `--file` wins; otherwise the platform config directory is
/// used. If neither is available the store runs on in-memory storage and the
/// change is lost at exit.
pub fn open_store(cli: &Cli, root: &RootElement) -> AppearanceStore {
    let mut builder = AppearanceStore::builder().root(root.clone());

    builder = match &cli.file {
        Some(path) => builder.storage(FileStorage::new(path)),
        None => match FileStorage::in_config_dir() {
            Ok(storage) => builder.storage(storage),
            Err(err) => {
                warn!(error = %err, "preferences will not be saved");
                builder
            }
        },
    };

    builder = match cli.system {
        Some(mode) => builder.preference(FixedPreference::new(mode.into())),
        None => builder.preference(OsPreference),
    };

    builder.open()
}

/// Runs the parsed command, writing results to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let mut sink = Sink {
        out,
        format: cli.output,
    };

    // The stylesheet does not depend on stored state.
    if matches!(cli.command, Command::Css) {
        return commands::css(&mut sink);
    }

    let root = RootElement::new();
    let store = open_store(cli, &root);
    commands::dispatch(&cli.command, &store, &root, &mut sink)
}
