//! Import a file, merge some steps into a saved role, save, export.

use std::collections::BTreeSet;
use std::sync::Arc;

use rml_application::{ExportService, ImportService, RoleLibrary};
use rml_core::identity::verify_identity;
use rml_core::step::StepId;
use rml_infrastructure::config::load_context;
use rml_infrastructure::{AsyncDirRoleRepository, TomlSettingsRepository};
use tempfile::TempDir;

#[tokio::test]
async fn test_import_merge_save_export() {
    let temp_dir = TempDir::new().unwrap();
    let settings = TomlSettingsRepository::new(Some(temp_dir.path())).unwrap();
    let context = load_context(&settings).await;

    let repo = AsyncDirRoleRepository::new(Some(temp_dir.path()))
        .await
        .unwrap();
    let library = RoleLibrary::new(Arc::new(repo), context);
    let importer = ImportService::new(&context);
    let exporter = ExportService::new();

    let mut tutor = library.create_from_template("language-tutor").await.unwrap();
    let coach = library.create_from_template("sleep-coach").await.unwrap();
    let coach_file = exporter
        .export_to_dir(&coach, &temp_dir.path().join("exports"))
        .await
        .unwrap();

    let preview = importer.import_file(&coach_file).await.unwrap();
    assert!(preview.result.is_valid);
    assert!(preview.steps_with_data().contains(&StepId::Journey));

    let selected = BTreeSet::from([StepId::Journey, StepId::Ethics]);
    let mut merged = importer.apply(&tutor, &preview, &selected);
    assert_eq!(merged.journey, coach.journey);
    assert_eq!(merged.behavior, tutor.behavior);

    library.save_role(&mut merged).await.unwrap();
    tutor = library.load_role(&merged.id).await.unwrap();
    assert!(verify_identity(&tutor).is_verified());
    assert_eq!(tutor.ethics.referral, coach.ethics.referral);

    let reimported = importer.import_full(&exporter.render(&tutor));
    assert!(
        reimported
            .warnings
            .iter()
            .any(|w| w.starts_with("RML identity verified"))
    );
    assert_eq!(library.list_roles().await.len(), 2);
}

#[tokio::test]
async fn test_imported_legacy_id_survives_save() {
    let temp_dir = TempDir::new().unwrap();
    let settings = TomlSettingsRepository::new(Some(temp_dir.path())).unwrap();
    let context = load_context(&settings).await;

    let repo = AsyncDirRoleRepository::new(Some(temp_dir.path()))
        .await
        .unwrap();
    let library = RoleLibrary::new(Arc::new(repo), context);
    let importer = ImportService::new(&context);

    let text = "id: role_1712345678.901\nname: Night Owl\ndescription: Late shifts\nmainGoal: Rest\n";
    let mut imported = importer.import_full(text).role;
    assert_eq!(imported.id, "role_1712345678.901");

    library.save_role(&mut imported).await.unwrap();
    let loaded = library.load_role("role_1712345678.901").await.unwrap();
    assert_eq!(loaded.name(), "Night Owl");
    assert_eq!(library.list_roles().await.len(), 1);
}
