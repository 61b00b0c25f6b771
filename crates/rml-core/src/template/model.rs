//! Template catalog models.

use serde::{Deserialize, Serialize};

use crate::config::Language;
use crate::role::Category;

/// A text in every supported UI language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ua: String,
    pub ru: String,
}

impl LocalizedText {
    pub fn new(en: &str, ua: &str, ru: &str) -> Self {
        Self {
            en: en.to_string(),
            ua: ua.to_string(),
            ru: ru.to_string(),
        }
    }

    /// Returns the text for `language`, falling back to English when blank.
    pub fn get(&self, language: Language) -> &str {
        let text = match language {
            Language::En => &self.en,
            Language::Ua => &self.ua,
            Language::Ru => &self.ru,
        };
        if text.trim().is_empty() { &self.en } else { text }
    }
}

/// Catalog entry pointing at a full template role. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreview {
    pub id: String,
    /// Id of the template role this preview describes
    pub role_id: String,
    pub category: Category,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub tags: Vec<String>,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_text_falls_back_to_english() {
        let text = LocalizedText::new("Coach", "", "Тренер");
        assert_eq!(text.get(Language::Ru), "Тренер");
        assert_eq!(text.get(Language::Ua), "Coach");
    }
}
