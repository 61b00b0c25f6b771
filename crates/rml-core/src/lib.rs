//! Core domain of the OpenRML role builder.
//!
//! - [`role`]: the role profile and its eight step sections
//! - [`codec`]: RML text import and export
//! - [`identity`]: content-hash identity of a role
//! - [`step`]: step partitioning and warning classification
//! - [`merge`]: partial merge of selected steps
//! - [`license`]: license terms and compatibility
//! - [`template`]: built-in template catalog
//! - [`repository`]: storage boundary traits

pub mod codec;
pub mod config;
pub mod error;
pub mod identity;
pub mod license;
pub mod merge;
pub mod repository;
pub mod role;
pub mod step;
pub mod template;

// Re-export common error type
pub use error::RmlError;
