//! `muss config` subcommands.

use crate::cli::{PathArgs, ShowArgs};
use crate::compose::{self, EnvExpander, write};
use crate::config::{ConfigLoader, ProjectConfig};
use crate::error::{MussError, Result};
use std::io::Write;

pub(crate) fn loader(paths: &PathArgs) -> ConfigLoader {
    ConfigLoader::new(&paths.project_file, &paths.user_file)
}

/// Resolve the project config and write the compose file.
pub fn cmd_save(paths: &PathArgs) -> Result<()> {
    let project = loader(paths).require()?;
    save_project(&project, paths)
}

pub(crate) fn save_project(project: &ProjectConfig, paths: &PathArgs) -> Result<()> {
    let synthesis = compose::synthesize(project, &EnvExpander)?;
    write::save(&synthesis, &paths.compose_file)
}

/// Print the project config, or the compose document, as YAML.
pub fn cmd_show(paths: &PathArgs, args: ShowArgs) -> Result<()> {
    let project = match loader(paths).load()? {
        Some(project) => project,
        None => {
            eprintln!(
                "muss project config '{}' file not found.",
                paths.project_file.display()
            );
            ProjectConfig::default()
        }
    };

    let stdout = std::io::stdout();
    show(&project, args.compose, &mut stdout.lock())
}

fn show(project: &ProjectConfig, compose: bool, out: &mut impl Write) -> Result<()> {
    let yaml = if compose {
        compose::synthesize(project, &EnvExpander)?
            .document
            .to_yaml()?
    } else {
        project.to_yaml()?
    };

    out.write_all(yaml.as_bytes())
        .map_err(|e| MussError::UserError(format!("failed to write output: {}", e)))
}
