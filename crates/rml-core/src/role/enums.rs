//! Closed vocabularies used by the role model.
//!
//! Every enum round-trips through its lowercase text form, which is what the
//! RML codec writes and what persisted JSON uses.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Character archetype of the role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Archetype {
    #[default]
    Mentor,
    Coach,
    Expert,
    Companion,
    Creative,
    Analyst,
    Guardian,
    Explorer,
}

/// How the role positions itself relative to the user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoleType {
    #[default]
    Assistant,
    Advisor,
    Facilitator,
    Specialist,
}

/// Publishing status. Any transition is allowed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoleStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Catalog category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    #[default]
    Productivity,
    Education,
    Health,
    Creativity,
    Business,
    Technology,
    Lifestyle,
    Entertainment,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    #[default]
    Friendly,
    Professional,
    Casual,
    Formal,
    Empathetic,
    Playful,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmotionalRange {
    Reserved,
    #[default]
    Balanced,
    Expressive,
}

/// How much memory a sub-role receives on hand-off.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MemoryScope {
    Hot,
    #[default]
    Warm,
    Full,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CompressionStrategy {
    #[default]
    Semantic,
    Chronological,
    Importance,
    Emotional,
}

/// Severity of the response expected when an ethical rule triggers.
///
/// Enforcement happens in the consuming AI system; this tool only records it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EthicalAction {
    #[default]
    Warn,
    Stop,
    Refer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_enum_cardinalities() {
        assert_eq!(Archetype::iter().count(), 8);
        assert_eq!(RoleType::iter().count(), 4);
        assert_eq!(RoleStatus::iter().count(), 3);
        assert_eq!(Category::iter().count(), 8);
    }

    #[test]
    fn test_text_form_is_lowercase() {
        assert_eq!(RoleStatus::Archived.to_string(), "archived");
        assert_eq!(CompressionStrategy::from_str("importance").unwrap(), CompressionStrategy::Importance);
        assert!(Tone::from_str("Friendly").is_err());
    }

    #[test]
    fn test_serde_matches_text_form() {
        let json = serde_json::to_string(&MemoryScope::Full).unwrap();
        assert_eq!(json, "\"full\"");
    }
}
