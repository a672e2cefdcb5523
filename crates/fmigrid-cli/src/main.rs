//! fmigrid — FMI target panel extraction and grid plots.
//! Entry point for the `fmigrid` binary.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::MissingInput;

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "fmigrid=debug,info" } else { "fmigrid=info,warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("fmigrid {}", env!("CARGO_PKG_VERSION"));

    let config = match fmigrid_config::Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Could not load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match commands::run(&cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<MissingInput>() {
                Some(missing) => {
                    debug!(path = %missing.path.display(), "Missing input");
                    eprintln!("{missing}");
                }
                None => eprintln!("Error: {e:?}"),
            }
            ExitCode::FAILURE
        }
    }
}
