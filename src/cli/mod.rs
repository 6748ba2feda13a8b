//! CLI argument parsing for muss.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::compose::write::COMPOSE_FILE;
use crate::config::{PROJECT_FILE, USER_FILE};

/// Muss: configure and run project services.
///
/// Services are described in `muss.yaml` as named variants (for example
/// "build from source" or "pull from registry"). Muss selects one variant per
/// service from the user's preferences, writes `docker-compose.yml`, and runs
/// docker-compose with it.
#[derive(Parser, Debug)]
#[command(name = "muss")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Log resolution details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Locations of the files muss reads and writes.
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Project config file.
    #[arg(long = "file", global = true, default_value = PROJECT_FILE)]
    pub project_file: PathBuf,

    /// User config file; its contents replace the project's `user` section.
    #[arg(long, global = true, default_value = USER_FILE)]
    pub user_file: PathBuf,

    /// Compose file to generate.
    #[arg(long, global = true, default_value = COMPOSE_FILE)]
    pub compose_file: PathBuf,
}

/// Available commands for muss.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Work with muss configuration.
    Config(ConfigCommand),

    /// Any other command is passed to docker-compose after saving the
    /// compose file (e.g. `muss up -d`, `muss logs -f app`).
    #[command(external_subcommand)]
    Compose(Vec<String>),
}

/// Arguments for the `config` command.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write the compose file and create file-backed volume sources.
    Save,

    /// Print configuration as YAML.
    Show(ShowArgs),
}

/// Arguments for the `config show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Print the generated compose document instead of the project config.
    #[arg(long)]
    pub compose: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
