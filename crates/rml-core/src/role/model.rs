//! Role domain model.
//!
//! A `Role` is the complete AI-persona profile authored through the builder.
//! Its attributes are grouped into one section per wizard step so that a
//! partial import of one step can never reach into another step's fields.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{
    Archetype, Category, CompressionStrategy, EmotionalRange, EthicalAction, MemoryScope,
    RoleStatus, RoleType, Tone,
};
use crate::license::LicenseInfo;

/// Version assigned to roles that do not carry one.
pub const DEFAULT_ROLE_VERSION: &str = "0.9.0";

/// Inclusive bounds of `BaseSection::response_length`.
pub const RESPONSE_LENGTH_RANGE: (u8, u8) = (1, 7);

/// Upper bound of every personality trait (lower bound is 0).
pub const TRAIT_MAX: u8 = 10;

/// Step 1: identity and publishing metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseSection {
    pub name: String,
    pub archetype: Archetype,
    pub role_type: RoleType,
    pub description: String,
    pub main_goal: String,
    /// Preferred answer length on a 1–7 scale
    pub response_length: u8,
    pub status: RoleStatus,
    /// Semantic version of the profile
    pub version: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for BaseSection {
    fn default() -> Self {
        Self {
            name: String::new(),
            archetype: Archetype::default(),
            role_type: RoleType::default(),
            description: String::new(),
            main_goal: String::new(),
            response_length: 4,
            status: RoleStatus::Draft,
            version: DEFAULT_ROLE_VERSION.to_string(),
            category: Category::default(),
            tags: Vec::new(),
        }
    }
}

/// Step 2: visual portrait used for avatar generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortraitSection {
    pub age_range: String,
    pub visual_style: String,
    pub visual_accent: String,
    pub visual_details: String,
    pub environment: String,
    pub atmosphere: String,
    pub image_style: String,
    pub lighting: String,
}

/// Five behavioural traits, each on a 0–10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub formality: u8,
    pub empathy: u8,
    pub humor: u8,
    pub directness: u8,
    pub creativity: u8,
}

impl Personality {
    pub const TRAIT_NAMES: [&'static str; 5] =
        ["formality", "empathy", "humor", "directness", "creativity"];

    fn values(&self) -> [u8; 5] {
        [
            self.formality,
            self.empathy,
            self.humor,
            self.directness,
            self.creativity,
        ]
    }

    fn values_mut(&mut self) -> [&mut u8; 5] {
        [
            &mut self.formality,
            &mut self.empathy,
            &mut self.humor,
            &mut self.directness,
            &mut self.creativity,
        ]
    }

    fn index_of(name: &str) -> Option<usize> {
        Self::TRAIT_NAMES.iter().position(|trait_name| *trait_name == name)
    }

    pub fn get(&self, name: &str) -> Option<u8> {
        Self::index_of(name).map(|i| self.values()[i])
    }

    /// Returns a mutable handle to the named trait, if the name is known.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut u8> {
        let index = Self::index_of(name)?;
        self.values_mut().into_iter().nth(index)
    }

    /// Every trait with its value, in [`Self::TRAIT_NAMES`] order.
    pub fn traits(&self) -> [(&'static str, u8); 5] {
        let values = self.values();
        std::array::from_fn(|i| (Self::TRAIT_NAMES[i], values[i]))
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            formality: 5,
            empathy: 5,
            humor: 5,
            directness: 5,
            creativity: 5,
        }
    }
}

/// Step 3: how the role talks and what it must or must not do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorSection {
    pub greeting: String,
    pub tone: Tone,
    pub emotional_range: EmotionalRange,
    pub personality: Personality,
    pub should_do: Vec<String>,
    pub should_not_do: Vec<String>,
}

/// Step 4: areas of knowledge and the formats the role produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpertiseSection {
    pub areas: Vec<String>,
    pub tools: Vec<String>,
    pub output_formats: Vec<String>,
    pub additional_rules: String,
}

/// One planned session of the user's journey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<String>,
    /// Always present, empty when the source had none
    #[serde(default)]
    pub outcomes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pacing {
    pub recommended_interval: String,
    pub max_sessions_per_week: u8,
}

/// Step 5: ordered sessions plus an optional pacing hint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JourneySection {
    pub sessions: Vec<Session>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pacing: Option<Pacing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubRole {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryTransfer {
    pub enabled: bool,
    pub scope: MemoryScope,
}

/// Step 6: team of sub-roles coordinated by an orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamSection {
    pub is_team: bool,
    pub orchestrator: String,
    pub sub_roles: Vec<SubRole>,
    pub handoff_protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_transfer: Option<MemoryTransfer>,
}

/// Step 7: memory buffers and compression strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemorySection {
    pub hot: String,
    pub warm: String,
    pub cold: String,
    pub compression: CompressionStrategy,
    pub emotional_states: Vec<String>,
}

/// A rule the consuming AI must respect, with the response it should take.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthicalRule {
    pub rule: String,
    pub action: EthicalAction,
}

impl EthicalRule {
    pub fn new(rule: impl Into<String>, action: EthicalAction) -> Self {
        Self {
            rule: rule.into(),
            action,
        }
    }
}

/// When and how the role refers the user to a human professional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferralProtocol {
    pub triggers: Vec<String>,
    pub message: String,
}

/// Step 8: ethics, authorship and licensing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EthicsSection {
    pub ethical_rules: Vec<EthicalRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral: Option<ReferralProtocol>,
    pub disclaimer: String,
    pub author: String,
    pub contacts: String,
    pub changelog: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<LicenseInfo>,
}

/// Content fingerprint embedded in an exported profile.
///
/// Used to detect edits made after export. Not a signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RmlIdentity {
    pub full_id: String,
    /// Section name -> section hash
    pub sections: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// False once a mismatch between stored and recomputed hashes was seen
    #[serde(default = "default_canonical")]
    pub canonical: bool,
}

fn default_canonical() -> bool {
    true
}

/// The complete AI role profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Opaque identifier (UUID v4 for roles created here)
    pub id: String,
    pub base: BaseSection,
    #[serde(default)]
    pub portrait: PortraitSection,
    #[serde(default)]
    pub behavior: BehaviorSection,
    #[serde(default)]
    pub expertise: ExpertiseSection,
    #[serde(default)]
    pub journey: JourneySection,
    #[serde(default)]
    pub team: TeamSection,
    #[serde(default)]
    pub memory: MemorySection,
    #[serde(default)]
    pub ethics: EthicsSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<RmlIdentity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Creates an empty role with a fresh id and default field values.
    pub fn new_empty() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            base: BaseSection::default(),
            portrait: PortraitSection::default(),
            behavior: BehaviorSection::default(),
            expertise: ExpertiseSection::default(),
            journey: JourneySection::default(),
            team: TeamSection::default(),
            memory: MemorySection::default(),
            ethics: EthicsSection::default(),
            identity: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.base.name
    }

    /// Marks the role as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Names of required narrative fields that are blank.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.base.name.trim().is_empty() {
            missing.push("name");
        }
        if self.base.description.trim().is_empty() {
            missing.push("description");
        }
        if self.base.main_goal.trim().is_empty() {
            missing.push("mainGoal");
        }
        missing
    }

    /// Lists every invariant the role currently violates.
    ///
    /// An empty list means the role is ready to be published.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let missing = self.missing_required_fields();
        if !missing.is_empty() {
            problems.push(format!("Missing required fields: {}", missing.join(", ")));
        }

        let (min, max) = RESPONSE_LENGTH_RANGE;
        if !(min..=max).contains(&self.base.response_length) {
            problems.push(format!(
                "responseLength {} is outside {}..={}",
                self.base.response_length, min, max
            ));
        }

        for (name, value) in self.behavior.personality.traits() {
            if value > TRAIT_MAX {
                problems.push(format!(
                    "personality.{} {} is outside 0..={}",
                    name, value, TRAIT_MAX
                ));
            }
        }

        if semver::Version::parse(&self.base.version).is_err() {
            problems.push(format!("version '{}' is not a semantic version", self.base.version));
        }

        problems
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::new_empty()
    }
}
