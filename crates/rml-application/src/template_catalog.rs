//! Template Catalog
//!
//! Built-in templates, with previews kept in a session cache and labels in
//! the user's language.

use std::sync::Arc;

use rml_core::config::Language;
use rml_core::repository::TemplateCache;
use rml_core::role::{Category, Role};
use rml_core::template::{TemplatePreview, category_label, template_previews, template_role};

pub struct TemplateCatalog {
    cache: Arc<dyn TemplateCache>,
}

impl TemplateCatalog {
    pub fn new(cache: Arc<dyn TemplateCache>) -> Self {
        Self { cache }
    }

    /// Every preview; built on first use and cached for the session.
    pub async fn previews(&self) -> Vec<TemplatePreview> {
        if let Some(previews) = self.cache.get_previews().await {
            return previews;
        }
        let previews = template_previews();
        self.cache.put_previews(previews.clone()).await;
        previews
    }

    pub async fn previews_in_category(&self, category: Category) -> Vec<TemplatePreview> {
        self.previews()
            .await
            .into_iter()
            .filter(|preview| preview.category == category)
            .collect()
    }

    /// Instantiates a template as a new, unsaved role.
    pub fn instantiate(&self, template_id: &str) -> Option<Role> {
        template_role(template_id)
    }

    pub fn category_label(&self, category: Category, language: Language) -> &'static str {
        category_label(category, language)
    }

    pub async fn refresh(&self) {
        self.cache.clear().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rml_infrastructure::SessionTemplateCache;

    #[tokio::test]
    async fn test_previews_are_cached() {
        let cache = Arc::new(SessionTemplateCache::new());
        let catalog = TemplateCatalog::new(cache.clone());
        assert!(cache.get_previews().await.is_none());

        let previews = catalog.previews().await;
        assert_eq!(cache.get_previews().await, Some(previews.clone()));

        catalog.refresh().await;
        assert!(cache.get_previews().await.is_none());
    }

    #[tokio::test]
    async fn test_category_filter_and_instantiate() {
        let catalog = TemplateCatalog::new(Arc::new(SessionTemplateCache::new()));

        let tech = catalog.previews_in_category(Category::Technology).await;
        assert_eq!(tech.len(), 1);
        let role = catalog.instantiate(&tech[0].id).unwrap();
        assert!(role.team.is_team);

        assert_eq!(
            catalog.category_label(Category::Technology, Language::Ru),
            "Технологии"
        );
    }
}
