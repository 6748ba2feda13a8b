//! File-backed bind mounts.
//!
//! Docker creates a missing bind-mount source as a directory. A volume entry
//! marked `file: true` asks muss to create the source as an empty file first:
//!
//! ```yaml
//! volumes:
//!   - type: bind
//!     source: ~/.netrc
//!     target: /root/.netrc
//!     file: true
//! ```
//!
//! The `file` key is not part of the compose format and is stripped here.

use super::expand::PathExpander;
use super::{FileAction, FileManifest};
use crate::error::{MussError, Result};
use serde_yaml::{Mapping, Value};

/// Strip `file` markers from `service`'s volumes and record their expanded
/// sources in `files`.
///
/// Entries that are not `type: bind` mappings with `file: true` are left
/// as they are.
pub fn extract_file_volumes(
    service: &mut Mapping,
    expander: &dyn PathExpander,
    files: &mut FileManifest,
) -> Result<()> {
    let Some(Value::Sequence(volumes)) = service.get_mut("volumes") else {
        return Ok(());
    };

    for volume in volumes.iter_mut() {
        let Value::Mapping(entry) = volume else {
            continue;
        };
        if !is_file_bind(entry) {
            continue;
        }

        let source = entry
            .get("source")
            .and_then(Value::as_str)
            .ok_or_else(|| MussError::PathExpansion {
                volume: entry
                    .get("target")
                    .and_then(Value::as_str)
                    .unwrap_or("<unknown>")
                    .to_string(),
                reason: "file volume has no string 'source'".to_string(),
            })?;

        let path = expander.expand(source)?;
        tracing::debug!(source, path = %path.display(), "file-backed volume");
        files.push(path, FileAction::EnsureEmpty);
        entry.shift_remove("file");
    }

    Ok(())
}

fn is_file_bind(entry: &Mapping) -> bool {
    entry.get("type").and_then(Value::as_str) == Some("bind")
        && entry.get("file").and_then(Value::as_bool) == Some(true)
}
