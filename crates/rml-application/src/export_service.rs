//! Export Service

use std::path::{Path, PathBuf};

use rml_core::codec::{export_file_name, export_role_to_text};
use rml_core::error::Result;
use rml_core::role::Role;
use rml_infrastructure::storage::write_atomic;

#[derive(Debug, Default, Clone, Copy)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, role: &Role) -> String {
        export_role_to_text(role)
    }

    /// Writes `role` to `<dir>/<slug>_role.rml.txt`, replacing any file there.
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Path of the written file
    /// * `Err(RmlError::Io)` - The directory or file could not be written
    pub async fn export_to_dir(&self, role: &Role, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(export_file_name(role));
        write_atomic(&path, self.render(role).as_bytes()).await?;
        tracing::info!(id = %role.id, path = %path.display(), "Exported role");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImportService;
    use rml_core::config::BuilderContext;
    use rml_core::template::template_role;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_export_then_import_file() {
        let temp_dir = TempDir::new().unwrap();
        let role = template_role("code-review-team").unwrap();

        let path = ExportService::new()
            .export_to_dir(&role, &temp_dir.path().join("out"))
            .await
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "code_review_team_role.rml.txt");

        let preview = ImportService::new(&BuilderContext::default())
            .import_file(&path)
            .await
            .unwrap();
        assert_eq!(preview.result.role, role);
    }
}
