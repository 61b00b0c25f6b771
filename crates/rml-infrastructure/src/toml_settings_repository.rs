//! SettingsRepository backed by `settings.toml`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rml_core::config::Settings;
use rml_core::error::{Result, RmlError};
use rml_core::repository::SettingsRepository;

use crate::RmlPaths;
use crate::dto::SettingsRecordV1;
use crate::storage::AtomicTomlFile;

pub struct TomlSettingsRepository {
    file: Arc<AtomicTomlFile<SettingsRecordV1>>,
}

impl TomlSettingsRepository {
    /// # Arguments
    ///
    /// * `base_dir` - Base directory override (for testing)
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let path = RmlPaths::new(base_dir).settings_file()?;
        Ok(Self::at(path))
    }

    /// Uses an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }

    /// Runs blocking file work off the async executor.
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&AtomicTomlFile<SettingsRecordV1>) -> Result<T> + Send + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || f(&file))
            .await
            .map_err(|e| RmlError::internal(format!("Settings task failed: {}", e)))?
    }
}

#[async_trait::async_trait]
impl SettingsRepository for TomlSettingsRepository {
    async fn load(&self) -> Result<Settings> {
        self.blocking(|file| match file.load()? {
            Some(record) => record.into_settings(),
            None => {
                tracing::debug!(path = %file.path().display(), "No settings file, using defaults");
                Ok(Settings::default())
            }
        })
        .await
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        let settings = *settings;
        self.blocking(move |file| {
            file.update(SettingsRecordV1::default(), |record| {
                *record = SettingsRecordV1::from(settings);
                Ok(())
            })?;
            tracing::info!(language = %settings.language, theme = %settings.theme, "Saved settings");
            Ok(())
        })
        .await
    }
}
