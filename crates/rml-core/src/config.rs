//! Settings and feature flags, passed around as an explicit context.
//!
//! Nothing in the core reads settings from a global store. A
//! [`BuilderContext`] is assembled once at startup (see
//! `rml_infrastructure::config::load_context`) and handed to whatever needs it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::codec::CodecOptions;

/// UI language of the catalog texts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ua,
    Ru,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// User preferences persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub theme: Theme,
}

/// Controls the RML identity fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityOptions {
    /// Read `IDENTITY:`/`REFERENCE:` lines and stamp identities on save
    pub enabled: bool,
    /// Recompute section hashes on import and report drift
    pub validate: bool,
}

impl Default for IdentityOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            validate: true,
        }
    }
}

/// Environment-driven switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub identity: IdentityOptions,
}

/// Everything a builder operation may need to know about its environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuilderContext {
    pub settings: Settings,
    pub features: FeatureFlags,
}

impl BuilderContext {
    pub fn new(settings: Settings, features: FeatureFlags) -> Self {
        Self { settings, features }
    }

    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            identity: self.features.identity,
        }
    }

    pub fn language(&self) -> Language {
        self.settings.language
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_identity_defaults_to_enabled() {
        let ctx = BuilderContext::default();
        assert!(ctx.codec_options().identity.enabled);
        assert!(ctx.codec_options().identity.validate);
    }

    #[test]
    fn test_settings_toml_roundtrip_with_missing_fields() {
        let settings: Settings = toml::from_str("language = \"ua\"").unwrap();
        assert_eq!(settings.language, Language::Ua);
        assert_eq!(settings.theme, Theme::Light);
        let text = toml::to_string(&settings).unwrap();
        assert!(text.contains("theme = \"light\""));
    }
}
