//! Stored settings document.

use rml_core::config::{Language, Settings, Theme};
use rml_core::error::Result;
use semver::Version;
use serde::{Deserialize, Serialize};

use super::ensure_compatible;

pub const SETTINGS_SCHEMA_VERSION: Version = Version::new(1, 0, 0);

fn current_version() -> Version {
    SETTINGS_SCHEMA_VERSION
}

/// V1 of `settings.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsRecordV1 {
    #[serde(default = "current_version")]
    pub schema_version: Version,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for SettingsRecordV1 {
    fn default() -> Self {
        Self::from(Settings::default())
    }
}

impl From<Settings> for SettingsRecordV1 {
    fn from(settings: Settings) -> Self {
        Self {
            schema_version: current_version(),
            language: settings.language,
            theme: settings.theme,
        }
    }
}

impl SettingsRecordV1 {
    pub fn into_settings(self) -> Result<Settings> {
        ensure_compatible("settings", &self.schema_version, &SETTINGS_SCHEMA_VERSION)?;
        Ok(Settings {
            language: self.language,
            theme: self.theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let record: SettingsRecordV1 = toml::from_str("theme = \"dark\"\n").unwrap();
        let settings = record.into_settings().unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.language, Language::En);
    }

    #[test]
    fn test_toml_shape() {
        let record = SettingsRecordV1::from(Settings {
            language: Language::Ua,
            theme: Theme::Light,
        });
        assert_eq!(record.schema_version, SETTINGS_SCHEMA_VERSION);
        let text = toml::to_string_pretty(&record).unwrap();
        assert!(text.contains("schema_version = \"1.0.0\""));
        assert!(text.contains("language = \"ua\""));
    }
}
