//! Template catalog module.
//!
//! # Module Structure
//!
//! - `model`: `TemplatePreview` and `LocalizedText`
//! - `preset`: built-in templates and translated category names

mod model;
mod preset;

pub use model::{LocalizedText, TemplatePreview};
pub use preset::{category_label, previews_in_category, template_previews, template_role};
