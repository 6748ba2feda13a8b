//! docker-compose runner for muss.
//!
//! Commands run with inherited stdio so interactive commands (`run`, `exec`,
//! `logs -f`) behave as if docker-compose had been called directly.

use crate::error::{MussError, Result};
use std::path::Path;
use std::process::Command;

/// Name of the orchestrator executable.
pub const COMPOSE_BIN: &str = "docker-compose";

/// Build the docker-compose command for `args` against `compose_file`.
pub fn compose_command(compose_file: &Path, args: &[String]) -> Command {
    let mut cmd = Command::new(COMPOSE_BIN);
    cmd.arg("--file").arg(compose_file).args(args);
    cmd
}

/// Run docker-compose and wait for it to exit.
///
/// # Returns
///
/// * `Ok(())` - docker-compose exited successfully
/// * `Err(MussError::ComposeError)` - docker-compose could not be started
/// * `Err(MussError::ComposeExit)` - docker-compose exited non-zero; the code is kept
pub fn run_compose(compose_file: &Path, args: &[String]) -> Result<()> {
    tracing::debug!(compose_file = %compose_file.display(), ?args, "running {}", COMPOSE_BIN);

    let status = compose_command(compose_file, args)
        .status()
        .map_err(|e| {
            MussError::ComposeError(format!(
                "failed to execute {} {}: {}",
                COMPOSE_BIN,
                args.first().map(String::as_str).unwrap_or(""),
                e
            ))
        })?;

    if status.success() {
        return Ok(());
    }

    // No exit code means the child was killed by a signal.
    Err(MussError::ComposeExit(status.code().unwrap_or(1)))
}
