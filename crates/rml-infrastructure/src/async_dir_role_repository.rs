//! Directory-backed RoleRepository implementation.
//!
//! One role = one JSON file, wrapped in a versioned [`RoleRecordV1`].
//! All I/O goes through `tokio::fs`.
//!
//! Directory structure:
//! ```text
//! base_dir/
//! └── roles/
//!     ├── <uuid-1>.json
//!     └── <uuid-2>.json
//! ```
//!
//! Ids outside `[A-Za-z0-9_-]` are percent-encoded into the file name.

use std::path::{Path, PathBuf};

use rml_core::error::{Result, RmlError};
use rml_core::repository::RoleRepository;
use rml_core::role::Role;

use crate::RmlPaths;
use crate::dto::RoleRecordV1;
use crate::storage::write_atomic;

const ENTITY_NAME: &str = "role";
const FILE_EXTENSION: &str = "json";

/// Maps an opaque role id to a file stem.
///
/// ASCII alphanumerics, `-` and `_` pass through, so UUID ids keep readable
/// file names. Every other byte becomes `%XX`, which keeps separators and
/// dots out of the name. The id itself is read back from the record.
fn file_stem(id: &str) -> String {
    let mut stem = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    stem
}

pub struct AsyncDirRoleRepository {
    roles_dir: PathBuf,
}

impl AsyncDirRoleRepository {
    pub async fn default() -> Result<Self> {
        Self::new(None).await
    }

    /// Creates a repository, creating the roles directory if needed.
    ///
    /// # Arguments
    ///
    /// * `base_dir` - Base directory override (for testing)
    pub async fn new(base_dir: Option<&Path>) -> Result<Self> {
        let roles_dir = RmlPaths::new(base_dir).roles_dir()?;
        tokio::fs::create_dir_all(&roles_dir).await?;
        tracing::debug!(dir = %roles_dir.display(), "Role repository ready");
        Ok(Self { roles_dir })
    }

    fn file_path(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() {
            return Err(RmlError::data_access("Role id must not be empty"));
        }
        Ok(self
            .roles_dir
            .join(format!("{}.{}", file_stem(id), FILE_EXTENSION)))
    }

    async fn read_role(path: &Path) -> Result<Role> {
        let content = tokio::fs::read_to_string(path).await?;
        let record: RoleRecordV1 = serde_json::from_str(&content)?;
        record.into_role()
    }
}

#[async_trait::async_trait]
impl RoleRepository for AsyncDirRoleRepository {
    async fn save(&self, role: &Role) -> Result<()> {
        let path = self.file_path(&role.id)?;
        let json = serde_json::to_vec_pretty(&RoleRecordV1::from_role(role))?;
        write_atomic(&path, &json).await?;
        tracing::info!(id = %role.id, name = %role.name(), "Saved role");
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Role>> {
        let path = self.file_path(id)?;
        if !tokio::fs::try_exists(&path).await? {
            return Ok(None);
        }
        Self::read_role(&path).await.map(Some)
    }

    async fn get_all(&self) -> Result<Vec<Role>> {
        let mut roles = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.roles_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(roles),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            match Self::read_role(&path).await {
                Ok(role) => roles.push(role),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable {} file", ENTITY_NAME);
                }
            }
        }

        roles.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        tracing::debug!(count = roles.len(), "Loaded roles");
        Ok(roles)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = self.file_path(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(id = %id, "Deleted role");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn named_role(name: &str) -> Role {
        let mut role = Role::new_empty();
        role.base.name = name.to_string();
        role.base.description = format!("{} description", name);
        role.base.main_goal = "Help".to_string();
        role
    }

    #[tokio::test]
    async fn test_save_and_get_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AsyncDirRoleRepository::new(Some(temp_dir.path()))
            .await
            .unwrap();

        let role = named_role("Sleep Coach");
        repo.save(&role).await.unwrap();

        let loaded = repo.get_by_id(&role.id).await.unwrap().unwrap();
        assert_eq!(loaded, role);
        assert!(
            temp_dir
                .path()
                .join("roles")
                .join(format!("{}.json", role.id))
                .exists()
        );
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AsyncDirRoleRepository::new(Some(temp_dir.path()))
            .await
            .unwrap();
        let id = uuid::Uuid::new_v4().to_string();
        assert!(repo.get_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_orders_by_updated_at_and_skips_bad_files() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AsyncDirRoleRepository::new(Some(temp_dir.path()))
            .await
            .unwrap();

        let mut older = named_role("Older");
        older.updated_at = Utc::now() - Duration::days(1);
        let newer = named_role("Newer");
        repo.save(&older).await.unwrap();
        repo.save(&newer).await.unwrap();
        tokio::fs::write(temp_dir.path().join("roles/broken.json"), "{ nope")
            .await
            .unwrap();
        tokio::fs::write(temp_dir.path().join("roles/notes.txt"), "ignored")
            .await
            .unwrap();

        let roles = repo.get_all().await.unwrap();
        let names: Vec<&str> = roles.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Newer", "Older"]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AsyncDirRoleRepository::new(Some(temp_dir.path()))
            .await
            .unwrap();

        let role = named_role("Temp");
        repo.save(&role).await.unwrap();
        repo.delete(&role.id).await.unwrap();
        repo.delete(&role.id).await.unwrap();
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_uses_trait_default() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AsyncDirRoleRepository::new(Some(temp_dir.path()))
            .await
            .unwrap();
        repo.save(&named_role("Sleep Coach")).await.unwrap();
        repo.save(&named_role("Code Reviewer")).await.unwrap();

        let found = repo.search("REVIEW").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Code Reviewer");
    }

    #[test]
    fn test_file_stem_encoding() {
        let id = uuid::Uuid::new_v4().to_string();
        assert_eq!(file_stem(&id), id);
        assert_eq!(file_stem("role_1712345678.901"), "role_1712345678%2E901");
        assert_eq!(file_stem("../outside"), "%2E%2E%2Foutside");
        assert_eq!(file_stem("a%2E"), "a%252E");
    }

    #[tokio::test]
    async fn test_opaque_ids_are_stored_inside_roles_dir() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AsyncDirRoleRepository::new(Some(temp_dir.path()))
            .await
            .unwrap();

        let mut dotted = named_role("Dotted");
        dotted.id = "role_1712345678.901".to_string();
        let mut escaping = named_role("Escape");
        escaping.id = "../outside".to_string();
        repo.save(&dotted).await.unwrap();
        repo.save(&escaping).await.unwrap();

        assert_eq!(repo.get_by_id(&dotted.id).await.unwrap(), Some(dotted.clone()));
        assert_eq!(repo.get_by_id(&escaping.id).await.unwrap(), Some(escaping.clone()));
        assert!(!temp_dir.path().join("outside.json").exists());

        let mut ids: Vec<String> = repo.get_all().await.unwrap().into_iter().map(|r| r.id).collect();
        ids.sort();
        assert_eq!(ids, ["../outside", "role_1712345678.901"]);

        repo.delete(&dotted.id).await.unwrap();
        assert!(repo.get_by_id(&dotted.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AsyncDirRoleRepository::new(Some(temp_dir.path()))
            .await
            .unwrap();

        let mut role = named_role("Nameless");
        role.id = String::new();
        assert!(repo.save(&role).await.is_err());
    }
}
