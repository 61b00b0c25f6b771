//! Field keys of the RML text format.

pub const RML_VERSION: &str = "RML-VERSION";
pub const IDENTITY: &str = "IDENTITY";
pub const REFERENCE: &str = "REFERENCE";

// META
pub const ID: &str = "id";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

// STEP 1
pub const NAME: &str = "name";
pub const ARCHETYPE: &str = "archetype";
pub const ROLE_TYPE: &str = "roleType";
pub const DESCRIPTION: &str = "description";
pub const MAIN_GOAL: &str = "mainGoal";
pub const RESPONSE_LENGTH: &str = "responseLength";
pub const STATUS: &str = "status";
pub const VERSION: &str = "version";
pub const CATEGORY: &str = "category";
pub const TAG: &str = "tag";

// STEP 2
pub const AGE_RANGE: &str = "ageRange";
pub const VISUAL_STYLE: &str = "visualStyle";
pub const VISUAL_ACCENT: &str = "visualAccent";
pub const VISUAL_DETAILS: &str = "visualDetails";
pub const ENVIRONMENT: &str = "environment";
pub const ATMOSPHERE: &str = "atmosphere";
pub const IMAGE_STYLE: &str = "imageStyle";
pub const LIGHTING: &str = "lighting";

// STEP 3
pub const GREETING: &str = "greeting";
pub const TONE: &str = "tone";
pub const EMOTIONAL_RANGE: &str = "emotionalRange";
pub const PERSONALITY_PREFIX: &str = "personality.";
pub const SHOULD_DO: &str = "shouldDo";
pub const SHOULD_NOT_DO: &str = "shouldNotDo";

// STEP 4
pub const AREA: &str = "area";
pub const TOOL: &str = "tool";
pub const OUTPUT_FORMAT: &str = "outputFormat";
pub const ADDITIONAL_RULES: &str = "additionalRules";

// STEP 5
pub const PACING_INTERVAL: &str = "pacing.recommendedInterval";
pub const PACING_MAX_PER_WEEK: &str = "pacing.maxSessionsPerWeek";
pub const SESSION_ID: &str = "session.id";
pub const SESSION_TITLE: &str = "session.title";
pub const SESSION_DURATION: &str = "session.duration";
pub const SESSION_TASK: &str = "session.task";
pub const SESSION_OUTCOME: &str = "session.outcome";

// STEP 6
pub const IS_TEAM: &str = "isTeam";
pub const ORCHESTRATOR: &str = "orchestrator";
pub const SUB_ROLE_ID: &str = "subRole.id";
pub const SUB_ROLE_NAME: &str = "subRole.name";
pub const SUB_ROLE_DESCRIPTION: &str = "subRole.description";
pub const HANDOFF_PROTOCOL: &str = "handoffProtocol";
pub const TRANSFER_ENABLED: &str = "memoryTransfer.enabled";
pub const TRANSFER_SCOPE: &str = "memoryTransfer.scope";

// STEP 7
pub const HOT_MEMORY: &str = "hotMemory";
pub const WARM_MEMORY: &str = "warmMemory";
pub const COLD_MEMORY: &str = "coldMemory";
pub const COMPRESSION: &str = "compression";
pub const EMOTIONAL_STATE: &str = "emotionalState";

// STEP 8
pub const ETHICAL_RULE: &str = "ethicalRule";
pub const REFERRAL_TRIGGER: &str = "referral.trigger";
pub const REFERRAL_MESSAGE: &str = "referral.message";
pub const DISCLAIMER: &str = "disclaimer";
pub const AUTHOR: &str = "author";
pub const CONTACTS: &str = "contacts";
pub const CHANGELOG: &str = "changelog";
pub const LICENSE_TYPE: &str = "license.type";
pub const LICENSE_ATTRIBUTION: &str = "license.attribution";
pub const LICENSE_EXPIRES_AT: &str = "license.expiresAt";
