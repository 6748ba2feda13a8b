//! Error types for the muss CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Every failure while resolving the project configuration aborts the whole
//! synthesis; nothing is retried and no partial compose document is produced.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for muss operations.
#[derive(Error, Debug)]
pub enum MussError {
    /// The user selected a variant the service does not define.
    #[error("config '{config}' for service '{service}' does not exist")]
    UnknownVariant { service: String, config: String },

    /// Neither the user's choice nor any preference matched a variant of the service.
    #[error(
        "no config selected for service '{service}': none of its configs appear in \
         service_preference or default_service_preference"
    )]
    NoVariantSelected { service: String },

    /// An `include` entry names a variant the service does not define.
    #[error("config '{include}' included by service '{service}' does not exist")]
    UnresolvedInclude { service: String, include: String },

    /// Two values at the same key cannot be merged structurally.
    #[error("cannot merge {source_kind} into {target_kind} at key '{key}'")]
    MergeConflict {
        key: String,
        target_kind: &'static str,
        source_kind: &'static str,
    },

    /// The source of a file-backed volume could not be expanded.
    #[error("failed to expand volume source '{volume}': {reason}")]
    PathExpansion { volume: String, reason: String },

    /// The project configuration has an unexpected shape or could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// User provided invalid arguments or the filesystem is in an unusable state.
    #[error("{0}")]
    UserError(String),

    /// docker-compose could not be started.
    #[error("docker-compose failed: {0}")]
    ComposeError(String),

    /// docker-compose ran but exited with a non-zero code.
    #[error("docker-compose exited with code {0}")]
    ComposeExit(i32),
}

impl MussError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MussError::UnknownVariant { .. }
            | MussError::NoVariantSelected { .. }
            | MussError::UnresolvedInclude { .. }
            | MussError::MergeConflict { .. }
            | MussError::PathExpansion { .. }
            | MussError::InvalidConfig(_) => exit_codes::CONFIG_ERROR,
            MussError::UserError(_) => exit_codes::USER_ERROR,
            MussError::ComposeError(_) => exit_codes::COMPOSE_FAILURE,
            MussError::ComposeExit(code) => *code,
        }
    }
}

/// Result type alias for muss operations.
pub type Result<T> = std::result::Result<T, MussError>;
