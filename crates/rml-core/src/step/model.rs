//! Wizard step identifiers and per-step field buckets.

use serde::{Deserialize, Serialize};

use crate::role::{
    BaseSection, BehaviorSection, EthicsSection, ExpertiseSection, JourneySection, MemorySection,
    PortraitSection, Role, TeamSection,
};

/// One of the eight fixed wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepId {
    Base = 1,
    Portrait = 2,
    Behavior = 3,
    Expertise = 4,
    Journey = 5,
    Team = 6,
    Memory = 7,
    Ethics = 8,
}

impl StepId {
    pub const ALL: [StepId; 8] = [
        StepId::Base,
        StepId::Portrait,
        StepId::Behavior,
        StepId::Expertise,
        StepId::Journey,
        StepId::Team,
        StepId::Memory,
        StepId::Ethics,
    ];

    pub fn all() -> impl Iterator<Item = StepId> {
        Self::ALL.into_iter()
    }

    /// Ordinal 1–8.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// Human label shown by the wizard.
    pub fn label(self) -> &'static str {
        match self {
            StepId::Base => "Base",
            StepId::Portrait => "Portrait",
            StepId::Behavior => "Behavior",
            StepId::Expertise => "Expertise",
            StepId::Journey => "Journey",
            StepId::Team => "Team",
            StepId::Memory => "Memory",
            StepId::Ethics => "Ethics",
        }
    }

    /// Lowercase name, used for identity section names.
    pub fn key(self) -> &'static str {
        match self {
            StepId::Base => "base",
            StepId::Portrait => "portrait",
            StepId::Behavior => "behavior",
            StepId::Expertise => "expertise",
            StepId::Journey => "journey",
            StepId::Team => "team",
            StepId::Memory => "memory",
            StepId::Ethics => "ethics",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// The fields owned by exactly one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "fields", rename_all = "lowercase")]
pub enum StepFields {
    Base(BaseSection),
    Portrait(PortraitSection),
    Behavior(BehaviorSection),
    Expertise(ExpertiseSection),
    Journey(JourneySection),
    Team(TeamSection),
    Memory(MemorySection),
    Ethics(EthicsSection),
}

impl StepFields {
    /// Copies the section belonging to `step` out of `role`.
    pub fn from_role(role: &Role, step: StepId) -> Self {
        match step {
            StepId::Base => StepFields::Base(role.base.clone()),
            StepId::Portrait => StepFields::Portrait(role.portrait.clone()),
            StepId::Behavior => StepFields::Behavior(role.behavior.clone()),
            StepId::Expertise => StepFields::Expertise(role.expertise.clone()),
            StepId::Journey => StepFields::Journey(role.journey.clone()),
            StepId::Team => StepFields::Team(role.team.clone()),
            StepId::Memory => StepFields::Memory(role.memory.clone()),
            StepId::Ethics => StepFields::Ethics(role.ethics.clone()),
        }
    }

    pub fn step(&self) -> StepId {
        match self {
            StepFields::Base(_) => StepId::Base,
            StepFields::Portrait(_) => StepId::Portrait,
            StepFields::Behavior(_) => StepId::Behavior,
            StepFields::Expertise(_) => StepId::Expertise,
            StepFields::Journey(_) => StepId::Journey,
            StepFields::Team(_) => StepId::Team,
            StepFields::Memory(_) => StepId::Memory,
            StepFields::Ethics(_) => StepId::Ethics,
        }
    }
}

/// A parsed role's fields for one step, ready for the user to accept or skip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepBucket {
    pub step: StepId,
    pub label: String,
    pub fields: StepFields,
    /// Whether the step carries meaningful content
    pub has_data: bool,
    /// Import warnings routed to this step
    #[serde(default)]
    pub warnings: Vec<String>,
}
