//! Command implementations for muss.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod config;

use crate::cli::{Command, ConfigAction, PathArgs};
use crate::docker;
use crate::error::{MussError, Result};

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, paths: &PathArgs) -> Result<()> {
    match command {
        Command::Config(cmd) => match cmd.action {
            ConfigAction::Save => config::cmd_save(paths),
            ConfigAction::Show(args) => config::cmd_show(paths, args),
        },
        Command::Compose(args) => cmd_compose(paths, &args),
    }
}

/// Save the compose file, then hand the arguments to docker-compose.
fn cmd_compose(paths: &PathArgs, args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(MussError::UserError("no command given".to_string()));
    }

    let project = config::loader(paths).require()?;
    config::save_project(&project, paths)?;
    docker::run_compose(&paths.compose_file, args)
}
