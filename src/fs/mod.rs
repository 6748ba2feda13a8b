//! Filesystem utilities for muss.
//!
//! The only filesystem writes muss performs: the generated compose file and
//! the empty files backing `file: true` bind mounts.

pub mod atomic;
mod ensure;

pub use atomic::atomic_write_file;
pub use ensure::ensure_file;
