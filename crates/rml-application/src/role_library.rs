//! Role Library Service
//!
//! The user's saved roles. Read paths never fail: storage errors are logged
//! and surface as an empty list or a missing role, so a broken file cannot
//! lock the user out of the builder. Write paths return the error.

use std::sync::Arc;

use rml_core::config::BuilderContext;
use rml_core::error::{Result, RmlError};
use rml_core::identity::stamp_identity;
use rml_core::repository::RoleRepository;
use rml_core::role::Role;
use rml_core::template::template_role;

pub struct RoleLibrary {
    repository: Arc<dyn RoleRepository>,
    context: BuilderContext,
}

impl RoleLibrary {
    pub fn new(repository: Arc<dyn RoleRepository>, context: BuilderContext) -> Self {
        Self {
            repository,
            context,
        }
    }

    pub fn context(&self) -> &BuilderContext {
        &self.context
    }

    /// All saved roles, most recently updated first.
    pub async fn list_roles(&self) -> Vec<Role> {
        match self.repository.get_all().await {
            Ok(roles) => roles,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list roles");
                Vec::new()
            }
        }
    }

    pub async fn search_roles(&self, query: &str) -> Vec<Role> {
        match self.repository.search(query).await {
            Ok(roles) => roles,
            Err(e) => {
                tracing::error!(error = %e, query = %query, "Failed to search roles");
                Vec::new()
            }
        }
    }

    pub async fn load_role(&self, id: &str) -> Option<Role> {
        match self.repository.get_by_id(id).await {
            Ok(role) => role,
            Err(e) => {
                tracing::error!(error = %e, id = %id, "Failed to load role");
                None
            }
        }
    }

    /// Persists `role`.
    ///
    /// Bumps `updated_at` and, when identities are enabled, re-stamps the
    /// identity so the stored copy always matches its content.
    ///
    /// # Arguments
    ///
    /// * `role` - The role to save; updated in place
    pub async fn save_role(&self, role: &mut Role) -> Result<()> {
        role.touch();
        if self.context.features.identity.enabled && stamp_identity(role) {
            tracing::debug!(id = %role.id, "Identity re-stamped");
        }
        self.repository.save(role).await
    }

    pub async fn delete_role(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await
    }

    /// A fresh, unsaved role with every field at its default.
    pub fn create_role(&self) -> Role {
        Role::new_empty()
    }

    /// Instantiates a built-in template and saves it as a new role.
    ///
    /// # Returns
    ///
    /// * `Ok(Role)` - The saved copy, with its own id
    /// * `Err(RmlError::NotFound)` - No template with this id
    pub async fn create_from_template(&self, template_id: &str) -> Result<Role> {
        let mut role =
            template_role(template_id).ok_or_else(|| RmlError::not_found("template", template_id))?;
        self.save_role(&mut role).await?;
        tracing::info!(template = %template_id, id = %role.id, "Created role from template");
        Ok(role)
    }
}
