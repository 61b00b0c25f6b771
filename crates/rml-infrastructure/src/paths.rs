//! Path management for OpenRML Builder data.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/openrml/           # Base directory (dirs::config_dir)
//! ├── settings.toml            # Language and theme
//! └── roles/                   # One JSON file per role
//!     ├── <uuid-1>.json
//!     └── <uuid-2>.json
//! ```

use std::path::{Path, PathBuf};

use rml_core::error::{Result, RmlError};

const APP_DIR_NAME: &str = "openrml";
const SETTINGS_FILE_NAME: &str = "settings.toml";
const ROLES_DIR_NAME: &str = "roles";

/// Resolves storage locations, optionally rooted at a custom base directory.
#[derive(Debug, Clone)]
pub struct RmlPaths {
    base_dir: Option<PathBuf>,
}

impl RmlPaths {
    /// Creates a resolver.
    ///
    /// # Arguments
    ///
    /// * `base_dir` - Override for the base directory (tests, portable installs)
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the base directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: The override, or `<config dir>/openrml`
    /// - `Err(RmlError::Config)`: No platform config directory could be found
    pub fn base_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.base_dir {
            return Ok(dir.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| RmlError::config("Cannot find config directory"))
    }

    pub fn settings_file(&self) -> Result<PathBuf> {
        Ok(self.base_dir()?.join(SETTINGS_FILE_NAME))
    }

    pub fn roles_dir(&self) -> Result<PathBuf> {
        Ok(self.base_dir()?.join(ROLES_DIR_NAME))
    }
}

impl Default for RmlPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
