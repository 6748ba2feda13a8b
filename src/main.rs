//! Muss: configure and run project services.
//!
//! This is the main entry point for the `muss` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod cli;
mod commands;
pub mod compose;
pub mod config;
pub mod docker;
pub mod error;
pub mod exit_codes;
pub mod fs;

use cli::Cli;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    match commands::dispatch(cli.command, &cli.paths) {
        Ok(()) => ExitCode::from(exit_codes::process_code(exit_codes::SUCCESS)),
        Err(err) => {
            // docker-compose already reported its own failure.
            if !matches!(err, error::MussError::ComposeExit(_)) {
                eprintln!("Error: {}", err);
            }

            ExitCode::from(exit_codes::process_code(err.exit_code()))
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: failed to set up logging");
    }
}
