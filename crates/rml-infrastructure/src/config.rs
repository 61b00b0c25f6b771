//! Startup configuration: feature flags from the environment and the
//! persisted settings, assembled into a [`BuilderContext`].

use rml_core::config::{BuilderContext, FeatureFlags, Settings};
use rml_core::repository::SettingsRepository;

/// Disables reading and stamping `IDENTITY:` lines altogether.
pub const DISABLE_IDENTITY_ENV: &str = "RML_DISABLE_IDENTITY";
/// Keeps identities but skips hash validation on import.
pub const DISABLE_IDENTITY_VALIDATION_ENV: &str = "RML_DISABLE_IDENTITY_VALIDATION";

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Builds feature flags from an arbitrary variable lookup.
pub fn feature_flags_from_lookup<F>(lookup: F) -> FeatureFlags
where
    F: Fn(&str) -> Option<String>,
{
    let disabled = |name: &str| lookup(name).is_some_and(|v| is_truthy(&v));

    let mut flags = FeatureFlags::default();
    flags.identity.enabled = !disabled(DISABLE_IDENTITY_ENV);
    flags.identity.validate = !disabled(DISABLE_IDENTITY_VALIDATION_ENV);
    flags
}

/// Reads feature flags from the process environment.
pub fn feature_flags_from_env() -> FeatureFlags {
    feature_flags_from_lookup(|name| std::env::var(name).ok())
}

/// Assembles the context used for the rest of the run.
///
/// Unreadable settings fall back to defaults so a corrupt file never
/// blocks startup.
pub async fn load_context(settings_repository: &dyn SettingsRepository) -> BuilderContext {
    let settings = match settings_repository.load().await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load settings, using defaults");
            Settings::default()
        }
    };
    let features = feature_flags_from_env();
    tracing::debug!(
        language = %settings.language,
        identity = features.identity.enabled,
        identity_validation = features.identity.validate,
        "Builder context loaded"
    );
    BuilderContext::new(settings, features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TomlSettingsRepository;
    use rml_core::config::Theme;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_flags_default_to_enabled() {
        let flags = feature_flags_from_lookup(lookup(&[]));
        assert!(flags.identity.enabled);
        assert!(flags.identity.validate);
    }

    #[test]
    fn test_truthy_values_disable() {
        let flags = feature_flags_from_lookup(lookup(&[
            (DISABLE_IDENTITY_ENV, "YES"),
            (DISABLE_IDENTITY_VALIDATION_ENV, "0"),
        ]));
        assert!(!flags.identity.enabled);
        assert!(flags.identity.validate);

        let flags = feature_flags_from_lookup(lookup(&[(DISABLE_IDENTITY_VALIDATION_ENV, " true ")]));
        assert!(flags.identity.enabled);
        assert!(!flags.identity.validate);
    }

    #[tokio::test]
    async fn test_load_context_survives_corrupt_settings() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("settings.toml"), "theme = [").unwrap();
        let repo = TomlSettingsRepository::new(Some(temp_dir.path())).unwrap();

        let context = load_context(&repo).await;
        assert_eq!(context.settings.theme, Theme::Light);
    }
}
