//! In-memory TemplateCache that lives as long as the process.

use rml_core::repository::TemplateCache;
use rml_core::template::TemplatePreview;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct SessionTemplateCache {
    previews: RwLock<Option<Vec<TemplatePreview>>>,
}

impl SessionTemplateCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TemplateCache for SessionTemplateCache {
    async fn get_previews(&self) -> Option<Vec<TemplatePreview>> {
        self.previews.read().await.clone()
    }

    async fn put_previews(&self, previews: Vec<TemplatePreview>) {
        tracing::debug!(count = previews.len(), "Caching template previews");
        *self.previews.write().await = Some(previews);
    }

    async fn clear(&self) {
        *self.previews.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rml_core::template::template_previews;

    #[tokio::test]
    async fn test_put_get_clear() {
        let cache = SessionTemplateCache::new();
        assert!(cache.get_previews().await.is_none());

        let previews = template_previews();
        cache.put_previews(previews.clone()).await;
        assert_eq!(cache.get_previews().await, Some(previews));

        cache.clear().await;
        assert!(cache.get_previews().await.is_none());
    }
}
