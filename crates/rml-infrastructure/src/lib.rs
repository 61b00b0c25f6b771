//! Storage adapters, startup configuration and logging for OpenRML Builder.

pub mod async_dir_role_repository;
pub mod config;
pub mod dto;
pub mod logging;
pub mod paths;
pub mod session_template_cache;
pub mod storage;
pub mod toml_settings_repository;

pub use crate::async_dir_role_repository::AsyncDirRoleRepository;
pub use crate::paths::RmlPaths;
pub use crate::session_template_cache::SessionTemplateCache;
pub use crate::toml_settings_repository::TomlSettingsRepository;
