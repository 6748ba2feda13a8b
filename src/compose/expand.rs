//! Expansion of volume source paths.
//!
//! File-backed volume sources are written by users as `~/.netrc` or
//! `${HOME}/.aws/credentials`. Before the files can be created they have to
//! be turned into real paths.

use crate::error::{MussError, Result};
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("env var pattern is valid")
});

/// Turns a user-written path into a concrete filesystem path.
pub trait PathExpander {
    fn expand(&self, raw: &str) -> Result<PathBuf>;
}

/// Expands `$VAR`/`${VAR}` from the process environment, then a leading `~`
/// to the current user's home directory.
///
/// Unset variables expand to the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvExpander;

impl PathExpander for EnvExpander {
    fn expand(&self, raw: &str) -> Result<PathBuf> {
        let home = dirs::home_dir();
        expand_path(raw, home.as_deref(), |name| std::env::var(name).ok())
    }
}

/// Expand `raw` with an explicit home directory and variable lookup.
pub fn expand_path<F>(raw: &str, home: Option<&Path>, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let substituted = ENV_VAR.replace_all(raw, |caps: &Captures| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());
        lookup(name).unwrap_or_default()
    });

    expand_home(&substituted, home).map_err(|reason| MussError::PathExpansion {
        volume: raw.to_string(),
        reason,
    })
}

fn expand_home(path: &str, home: Option<&Path>) -> std::result::Result<PathBuf, String> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };

    if !rest.is_empty() && !rest.starts_with('/') && !rest.starts_with('\\') {
        return Err("cannot expand user-specific home dir".to_string());
    }

    let home = home.ok_or_else(|| "home directory could not be determined".to_string())?;
    let rest = rest.trim_start_matches(['/', '\\']);

    if rest.is_empty() {
        Ok(home.to_path_buf())
    } else {
        Ok(home.join(rest))
    }
}
