//! Creation of bind-mount source files.

use crate::error::{MussError, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Make sure `path` exists as a regular file.
///
/// An existing file is left untouched. A missing file is created empty,
/// along with its parent directories. A directory at `path` is an error:
/// mounting it where a file is expected is exactly what this guards against.
pub fn ensure_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.is_dir() {
        return Err(MussError::UserError(format!(
            "'{}' must be a file but is a directory",
            path.display()
        )));
    }
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| {
            MussError::UserError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            MussError::UserError(format!("failed to create file '{}': {}", path.display(), e))
        })?;

    tracing::info!(path = %path.display(), "created empty file");
    Ok(())
}
