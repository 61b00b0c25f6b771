//! Import Service
//!
//! Turns RML text into either a whole new role or a per-step preview the
//! user picks from before merging into the role being edited.

use std::collections::BTreeSet;
use std::path::Path;

use rml_core::codec::{ImportResult, RmlCodec};
use rml_core::config::BuilderContext;
use rml_core::error::Result;
use rml_core::merge::merge_selected_steps;
use rml_core::role::Role;
use rml_core::step::{StepBucket, StepId, partition_import};
use serde::Serialize;

/// A parsed file split into the eight wizard steps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub result: ImportResult,
    pub buckets: Vec<StepBucket>,
}

impl ImportPreview {
    /// Steps the user could meaningfully import.
    pub fn steps_with_data(&self) -> Vec<StepId> {
        self.buckets
            .iter()
            .filter(|bucket| bucket.has_data)
            .map(|bucket| bucket.step)
            .collect()
    }
}

pub struct ImportService {
    codec: RmlCodec,
}

impl ImportService {
    pub fn new(context: &BuilderContext) -> Self {
        Self {
            codec: RmlCodec::new(context.codec_options()),
        }
    }

    /// Parses `text` and partitions it for step-selective import.
    pub fn preview(&self, text: &str) -> ImportPreview {
        let result = self.codec.parse(text);
        log_result(&result);
        let buckets = partition_import(&result);
        ImportPreview { result, buckets }
    }

    /// Merges the `selected` steps of `preview` onto `current`.
    ///
    /// Unselected steps, the id, the identity block and the timestamps of
    /// `current` are kept as they are.
    pub fn apply(
        &self,
        current: &Role,
        preview: &ImportPreview,
        selected: &BTreeSet<StepId>,
    ) -> Role {
        let merged = merge_selected_steps(current, &preview.buckets, selected);
        tracing::info!(
            id = %current.id,
            steps = ?selected.iter().map(|s| s.number()).collect::<Vec<_>>(),
            "Merged imported steps"
        );
        merged
    }

    /// Parses `text` as a complete role.
    pub fn import_full(&self, text: &str) -> ImportResult {
        let result = self.codec.parse(text);
        log_result(&result);
        result
    }

    /// Reads an RML file and previews it.
    ///
    /// # Returns
    ///
    /// * `Ok(ImportPreview)` - The file was read; parse problems are inside
    /// * `Err(RmlError::Io)` - The file could not be read
    pub async fn import_file(&self, path: &Path) -> Result<ImportPreview> {
        let text = tokio::fs::read_to_string(path).await?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "Read RML file");
        Ok(self.preview(&text))
    }
}

fn log_result(result: &ImportResult) {
    if result
        .warnings
        .iter()
        .any(|w| w.starts_with("RML identity mismatch"))
    {
        tracing::warn!(id = %result.role.id, "Imported role was edited after its identity was stamped");
    }
    tracing::info!(
        name = %result.role.name(),
        valid = result.is_valid,
        warnings = result.warnings.len(),
        errors = result.errors.len(),
        "Parsed RML role"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rml_core::codec::export_role_to_text;
    use rml_core::template::template_role;
    use tempfile::TempDir;

    fn service() -> ImportService {
        ImportService::new(&BuilderContext::default())
    }

    #[test]
    fn test_preview_buckets_and_warning_routing() {
        let text = "name: Minimal\ndescription: d\nmainGoal: g\ntone: sarcastic\n";
        let preview = service().preview(text);

        assert_eq!(preview.buckets.len(), 8);
        assert_eq!(preview.steps_with_data(), vec![StepId::Base]);
        let behavior = &preview.buckets[StepId::Behavior.number() as usize - 1];
        assert_eq!(behavior.step, StepId::Behavior);
        assert!(behavior.warnings.iter().any(|w| w.contains("tone")));
    }

    #[test]
    fn test_apply_merges_only_selected() {
        let service = service();
        let current = template_role("language-tutor").unwrap();
        let preview = service.preview(&export_role_to_text(&template_role("sleep-coach").unwrap()));

        let merged = service.apply(&current, &preview, &BTreeSet::from([StepId::Ethics]));
        assert_eq!(merged.ethics, preview.result.role.ethics);
        assert_eq!(merged.behavior, current.behavior);
        assert_eq!(merged.id, current.id);
    }

    #[test]
    fn test_import_full_reports_missing_fields() {
        let result = service().import_full("name: Only a name\n");
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Missing required fields: description, mainGoal"]);
    }

    #[tokio::test]
    async fn test_import_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("coach_role.rml.txt");
        let role = template_role("sleep-coach").unwrap();
        tokio::fs::write(&path, export_role_to_text(&role)).await.unwrap();

        let preview = service().import_file(&path).await.unwrap();
        assert!(preview.result.is_valid);
        assert_eq!(preview.result.role, role);
    }

    #[tokio::test]
    async fn test_import_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = service()
            .import_file(&temp_dir.path().join("missing.rml.txt"))
            .await
            .unwrap_err();
        assert!(err.is_io());
    }
}
