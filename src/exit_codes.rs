//! Exit code constants for the muss CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing project file, filesystem problems)
//! - 2: Configuration error (variant selection, includes, merge conflicts, path expansion)
//! - 3: docker-compose could not be launched
//!
//! When docker-compose itself exits non-zero its exit code is passed through,
//! narrowed by [`process_code`].

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing project file, or a filesystem failure.
pub const USER_ERROR: i32 = 1;

/// The project configuration could not be resolved into a compose document.
pub const CONFIG_ERROR: i32 = 2;

/// The docker-compose process could not be started.
pub const COMPOSE_FAILURE: i32 = 3;

/// Narrow an exit code to what the process can report.
///
/// Codes outside `0..=255` become [`USER_ERROR`], so a failure is never
/// reported as success.
pub fn process_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(USER_ERROR as u8)
}
