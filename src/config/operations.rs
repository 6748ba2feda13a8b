//! Config loading and serialization.

use super::model::{ProjectConfig, UserConfig};
use crate::error::{MussError, Result};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Default path of the project config file.
pub const PROJECT_FILE: &str = "muss.yaml";

/// Default path of the per-user config file.
pub const USER_FILE: &str = "muss.user.yaml";

impl ProjectConfig {
    /// Load a project config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(ProjectConfig)` - Successfully parsed config
    /// * `Err(MussError::UserError)` - The file could not be read
    /// * `Err(MussError::InvalidConfig)` - The file is not valid project YAML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_file(path)?;
        Self::from_yaml(&content)
            .map_err(|e| MussError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    /// Parse a project config from a YAML string.
    ///
    /// Unknown keys are preserved in `extra`. Merge keys (`<<: *anchor`) are
    /// expanded before the records are built.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        parse_merged(yaml)
            .map_err(|e| MussError::InvalidConfig(format!("failed to parse project YAML: {}", e)))
    }

    /// Serialize the config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            MussError::InvalidConfig(format!("failed to serialize config to YAML: {}", e))
        })
    }
}

impl UserConfig {
    /// Parse a user config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        parse_merged(yaml)
            .map_err(|e| MussError::InvalidConfig(format!("failed to parse user YAML: {}", e)))
    }
}

/// Locates and loads the project and user config files.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    pub project_file: PathBuf,
    pub user_file: PathBuf,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            project_file: PathBuf::from(PROJECT_FILE),
            user_file: PathBuf::from(USER_FILE),
        }
    }
}

impl ConfigLoader {
    pub fn new(project_file: impl Into<PathBuf>, user_file: impl Into<PathBuf>) -> Self {
        Self {
            project_file: project_file.into(),
            user_file: user_file.into(),
        }
    }

    /// Load the project config, layering the user file on top.
    ///
    /// Returns `Ok(None)` when the project file does not exist. When the user
    /// file exists it replaces the project's `user` section entirely.
    pub fn load(&self) -> Result<Option<ProjectConfig>> {
        if !self.project_file.is_file() {
            tracing::debug!(project_file = %self.project_file.display(), "no project config found");
            return Ok(None);
        }

        let mut config = ProjectConfig::load(&self.project_file)?;

        if self.user_file.is_file() {
            tracing::debug!(user_file = %self.user_file.display(), "loading user config");
            let content = read_file(&self.user_file)?;
            let user = UserConfig::from_yaml(&content).map_err(|e| {
                MussError::InvalidConfig(format!("{}: {}", self.user_file.display(), e))
            })?;
            config.user = Some(user);
        }

        Ok(Some(config))
    }

    /// Load the project config, failing when the project file is missing.
    pub fn require(&self) -> Result<ProjectConfig> {
        self.load()?.ok_or_else(|| {
            MussError::UserError(format!(
                "muss project config '{}' file not found.",
                self.project_file.display()
            ))
        })
    }
}

/// Parse YAML, resolve `<<` merge keys, then deserialize.
///
/// An empty document is treated as an empty mapping.
fn parse_merged<T: DeserializeOwned>(yaml: &str) -> serde_yaml::Result<T> {
    let mut value: Value = serde_yaml::from_str(yaml)?;
    if value.is_null() {
        value = Value::Mapping(Mapping::new());
    }
    value.apply_merge()?;
    serde_yaml::from_value(value)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        MussError::UserError(format!(
            "failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })
}
