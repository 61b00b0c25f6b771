//! Storage boundary traits.
//!
//! Implementations live in `rml-infrastructure`; the application layer
//! only sees these traits.

use crate::config::Settings;
use crate::error::Result;
use crate::role::Role;
use crate::template::TemplatePreview;

/// Returns true when `query` occurs in the role's name, description, main
/// goal or one of its tags.
///
/// Matching is case-insensitive. A blank query matches every role.
pub fn role_matches(role: &Role, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    role.base.name.to_lowercase().contains(&needle)
        || role.base.description.to_lowercase().contains(&needle)
        || role.base.main_goal.to_lowercase().contains(&needle)
        || role
            .base
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// An abstract repository for the user's role library.
#[async_trait::async_trait]
pub trait RoleRepository: Send + Sync {
    /// Creates or replaces the role with `role.id`.
    async fn save(&self, role: &Role) -> Result<()>;

    /// Retrieves a role by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Role))`: The role was found
    /// - `Ok(None)`: No role with this id
    /// - `Err(RmlError)`: Storage failure
    async fn get_by_id(&self, id: &str) -> Result<Option<Role>>;

    /// Retrieves every stored role, most recently updated first.
    async fn get_all(&self) -> Result<Vec<Role>>;

    /// Deletes a role. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Roles matching `query`, see [`role_matches`].
    async fn search(&self, query: &str) -> Result<Vec<Role>> {
        let roles = self.get_all().await?;
        Ok(roles
            .into_iter()
            .filter(|role| role_matches(role, query))
            .collect())
    }
}

/// Persists user settings.
#[async_trait::async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads settings, returning defaults when nothing was saved yet.
    async fn load(&self) -> Result<Settings>;

    async fn save(&self, settings: &Settings) -> Result<()>;
}

/// Session-lived cache of template previews.
#[async_trait::async_trait]
pub trait TemplateCache: Send + Sync {
    async fn get_previews(&self) -> Option<Vec<TemplatePreview>>;

    async fn put_previews(&self, previews: Vec<TemplatePreview>);

    async fn clear(&self);
}
