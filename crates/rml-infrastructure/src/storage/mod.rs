//! Storage layer for atomic file operations.

mod atomic_file;
mod atomic_toml;

pub use atomic_file::write_atomic;
pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
