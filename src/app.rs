// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod matcher;
pub mod models;
pub mod scanner;
pub mod search;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::fmt::Display;
use std::io::{self, Write};
use std::process::ExitCode;

use self::cli::Cli;
use self::config::{load_presets_file, presets_path, resolve_config, Presets};
use self::search::search;

/// Parses arguments, resolves configuration and runs the search.
///
/// Usage problems are reported here and turned into a failing exit code.
/// Errors returned from this function are printed by `main`.
pub fn run() -> Result<ExitCode> {
    // 1. Parse Args
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            print_text(err.render());
            // --help and --version also land here
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            return Ok(code);
        }
    };

    if args.is_incomplete() {
        print_usage();
        return Ok(ExitCode::FAILURE);
    }

    // 2. Resolve Configuration
    let presets = match args.preset {
        Some(_) => load_presets_file(&presets_path()?)?,
        None => Presets::new(),
    };
    let config = resolve_config(args, &presets);
    log::debug!("resolved configuration: {config:?}");

    // 3. Walk and print
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = search(&config, &mut out)?;

    log::debug!(
        "visited {} paths ({} directories), {} matched, {} unreadable",
        summary.visited,
        summary.directories,
        summary.matched,
        summary.soft_errors
    );
    Ok(ExitCode::SUCCESS)
}

fn print_usage() {
    print_text(format_args!("{}\n", Cli::command().render_help()));
}

/// Writes to stdout without panicking when the reader has gone away.
pub fn print_text(text: impl Display) {
    let _ = write!(io::stdout().lock(), "{text}");
}
