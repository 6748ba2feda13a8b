//! Project configuration model for muss.
//!
//! This module defines the records that represent `muss.yaml` and the
//! per-user `muss.user.yaml`. Parsing is forward-compatible: unknown keys are
//! kept, missing keys take defaults. The loaded value is passed explicitly to
//! the resolver; there is no process-wide config cache.

mod model;
mod operations;


pub use model::{ProjectConfig, ServiceDefinition, UserConfig, UserServiceChoice};
pub use operations::{ConfigLoader, PROJECT_FILE, USER_FILE};
