//! Data Transfer Objects (DTOs) for persistence.
//!
//! Every stored document carries a `schema_version`. Readers accept any
//! version with the same MAJOR as the one they write and reject the rest,
//! so a file written by a newer build is reported instead of silently
//! losing fields.
//!
//! ### RoleRecord Version History
//! - **1.0.0**: Role wrapped with its schema version
//!
//! ### SettingsRecord Version History
//! - **1.0.0**: Language and theme

mod role;
mod settings;

pub use role::{ROLE_SCHEMA_VERSION, RoleRecordV1};
pub use settings::{SETTINGS_SCHEMA_VERSION, SettingsRecordV1};

use rml_core::error::{Result, RmlError};
use semver::Version;

/// Rejects documents whose MAJOR schema version differs from `current`.
pub(crate) fn ensure_compatible(kind: &str, found: &Version, current: &Version) -> Result<()> {
    if found.major != current.major {
        return Err(RmlError::data_access(format!(
            "Unsupported {} schema version {} (expected {}.x)",
            kind, found, current.major
        )));
    }
    Ok(())
}
