//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use folio_appearance::Mode;

/// Environment variable naming the preferences file.
pub const FILE_ENV: &str = "FOLIO_APPEARANCE_FILE";

/// Inspect and change the portfolio's light/dark mode and accent scheme
#[derive(Debug, Parser)]
#[command(name = "folio", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Preferences file (default: <config dir>/folio/appearance.yaml)
    #[arg(short, long, global = true, env = FILE_ENV, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Use this system preference instead of asking the OS
    #[arg(long, global = true, value_name = "MODE")]
    pub system: Option<SystemMode>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Log store activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the current mode and scheme
    Show,
    /// Flip between light and dark
    Toggle,
    /// Switch the accent color scheme
    Scheme {
        /// One of: sky, purple, orange, green
        name: String,
    },
    /// List the available color schemes
    Schemes,
    /// Print the document root tag carrying the appearance attributes
    Root,
    /// Print the CSS rules keyed on the root attributes
    Css,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SystemMode {
    Light,
    Dark,
}

impl From<SystemMode> for Mode {
    fn from(mode: SystemMode) -> Self {
        match mode {
            SystemMode::Light => Mode::Light,
            SystemMode::Dark => Mode::Dark,
        }
    }
}
