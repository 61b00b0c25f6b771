//! Application layer for OpenRML Builder.
//!
//! Use cases that sit between the wizard and the storage adapters: the
//! role library, file import with step-selective merge, export, and the
//! template catalog.

pub mod export_service;
pub mod import_service;
pub mod role_library;
pub mod template_catalog;

pub use export_service::ExportService;
pub use import_service::{ImportPreview, ImportService};
pub use role_library::RoleLibrary;
pub use template_catalog::TemplateCatalog;
