//! Role domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Role` record and its per-step sections
//! - `enums`: closed vocabularies (archetype, status, tone, ...)

mod enums;
mod model;

pub use enums::{
    Archetype, Category, CompressionStrategy, EmotionalRange, EthicalAction, MemoryScope,
    RoleStatus, RoleType, Tone,
};
pub use model::{
    BaseSection, BehaviorSection, DEFAULT_ROLE_VERSION, EthicalRule, EthicsSection,
    ExpertiseSection, JourneySection, MemorySection, MemoryTransfer, Pacing, Personality,
    PortraitSection, RESPONSE_LENGTH_RANGE, ReferralProtocol, RmlIdentity, Role, Session, SubRole,
    TRAIT_MAX, TeamSection,
};
