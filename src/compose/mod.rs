//! Compose document synthesis.
//!
//! Turns a [`ProjectConfig`] into a docker-compose document:
//!
//! 1. Start from `{version: "3.7", volumes: {}, services: {}}`.
//! 2. For each service definition, in declaration order, select a variant
//!    ([`resolver`]) and merge it in ([`merge`]).
//! 3. Merge `user.override` last.
//! 4. Strip `file` markers from bind mounts, collecting the files to create
//!    ([`volumes`]), and drop services that have neither `build` nor `image`.
//!
//! Nothing here touches the filesystem; [`write`] applies the result.

pub mod expand;
pub mod merge;
pub mod resolver;
pub mod volumes;
pub mod write;

#[cfg(test)]
mod tests;

use crate::config::ProjectConfig;
use crate::error::{MussError, Result};
use expand::PathExpander;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

pub use expand::EnvExpander;
pub use merge::merge;
pub use resolver::resolve_service;

/// Compose file format version used when no fragment sets one.
pub const DEFAULT_VERSION: &str = "3.7";

/// A docker-compose document. Always carries `version`, `volumes` and
/// `services` at the top level.
#[derive(Debug, Clone, PartialEq)]
pub struct Document(Mapping);

impl Default for Document {
    fn default() -> Self {
        let mut root = Mapping::new();
        root.insert("version".into(), DEFAULT_VERSION.into());
        root.insert("volumes".into(), Value::Mapping(Mapping::new()));
        root.insert("services".into(), Value::Mapping(Mapping::new()));
        Self(root)
    }
}

impl Document {
    pub fn version(&self) -> Option<&str> {
        self.0.get("version").and_then(Value::as_str)
    }

    /// The `services` mapping, if it is a mapping.
    pub fn services(&self) -> Option<&Mapping> {
        self.0.get("services").and_then(Value::as_mapping)
    }

    pub fn service(&self, name: &str) -> Option<&Mapping> {
        self.services()?.get(name).and_then(Value::as_mapping)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    /// Merge `fragment` on top of this document.
    ///
    /// A null `version` falls back to [`DEFAULT_VERSION`]. Nulling `volumes`
    /// or `services` is a merge conflict.
    fn merge(&mut self, fragment: &Mapping) -> Result<()> {
        let mut merged = merge(&self.0, fragment)?;
        if merged.get("version").is_none_or(Value::is_null) {
            merged.insert("version".into(), DEFAULT_VERSION.into());
        }
        self.0 = merged;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.0).map_err(|e| {
            MussError::InvalidConfig(format!("failed to serialize compose document: {}", e))
        })
    }
}

/// What to do with a path before docker-compose runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Create an empty file unless one exists. A directory at the path is an error.
    EnsureEmpty,
}

/// Filesystem side effects required by the document, in discovery order.
///
/// The same path may appear more than once; applying an entry is idempotent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileManifest {
    entries: Vec<(PathBuf, FileAction)>,
}

impl FileManifest {
    pub fn push(&mut self, path: PathBuf, action: FileAction) {
        self.entries.push((path, action));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, FileAction)> {
        self.entries.iter().map(|(p, a)| (p.as_path(), *a))
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.iter().map(|(p, _)| p).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The result of synthesizing a project config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Synthesis {
    pub document: Document,
    pub files: FileManifest,
}

/// Build the compose document and file manifest for `project`.
///
/// The first error aborts synthesis; no partial document is returned.
pub fn synthesize(project: &ProjectConfig, expander: &dyn PathExpander) -> Result<Synthesis> {
    let mut document = Document::default();

    for service in &project.service_definitions {
        let fragment = resolve_service(project, service)?;
        document.merge(&fragment)?;
    }

    if let Some(user_override) = project.user_override() {
        tracing::debug!("applying user override");
        document.merge(user_override)?;
    }

    let mut files = FileManifest::default();
    finalize_services(&mut document, expander, &mut files)?;

    Ok(Synthesis { document, files })
}

/// Extract file volumes from every service and drop services that cannot run.
fn finalize_services(
    document: &mut Document,
    expander: &dyn PathExpander,
    files: &mut FileManifest,
) -> Result<()> {
    let Some(Value::Mapping(services)) = document.0.get_mut("services") else {
        return Ok(());
    };

    let mut dropped = Vec::new();
    for (name, service) in services.iter_mut() {
        let Value::Mapping(service) = service else {
            dropped.push(name.clone());
            continue;
        };

        volumes::extract_file_volumes(service, expander, files)?;

        if !is_runnable(service) {
            dropped.push(name.clone());
        }
    }

    for name in dropped {
        tracing::info!(
            service = name.as_str().unwrap_or_default(),
            "dropping service without 'build' or 'image'"
        );
        services.shift_remove(&name);
    }

    Ok(())
}

fn is_runnable(service: &Mapping) -> bool {
    service.contains_key("build") || service.contains_key("image")
}
