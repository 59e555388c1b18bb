//! CLI entry point for folio.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use folio::cli::Cli;
use tracing::Level;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match folio::run(&cli, &mut out) {
        Ok(()) => {
            let _ = out.flush();
            ExitCode::SUCCESS
        }
        Err(err) => {
            let _ = out.flush();
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
