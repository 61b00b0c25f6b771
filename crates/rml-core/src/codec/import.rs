//! RML text -> Role.
//!
//! The parser is tolerant: nothing aborts it. Problems become entries in
//! `ImportResult::warnings` (recoverable) or `ImportResult::errors` (the
//! result is invalid but the partially parsed role is still returned).

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CodecOptions, keys};
use super::text::{Line, classify, unescape};
use crate::config::IdentityOptions;
use crate::identity::{self, IdentityCheck};
use crate::license::LicenseInfo;
use crate::role::{
    DEFAULT_ROLE_VERSION, EthicalAction, EthicalRule, MemoryTransfer, Pacing, RESPONSE_LENGTH_RANGE,
    ReferralProtocol, RmlIdentity, Role, Session, SubRole, TRAIT_MAX,
};

/// Result of parsing an RML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub role: Role,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub is_valid: bool,
}

/// Ethical rule as it appears in a file.
///
/// Older exports wrote bare strings; both shapes are normalized to
/// [`EthicalRule`] before the role leaves the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RawEthicalRule {
    Legacy(String),
    Rule(EthicalRule),
}

/// Parser state for one file.
struct RoleParser<'o> {
    options: &'o IdentityOptions,
    role: Role,
    warnings: Vec<String>,
    seen: HashSet<&'static str>,
    raw_rules: Vec<RawEthicalRule>,
    identity: Option<RmlIdentity>,
    reference: Option<String>,
}

/// Keys whose absence is reported after parsing.
const TRACKED_KEYS: [&str; 6] = [
    keys::ID,
    keys::CREATED_AT,
    keys::UPDATED_AT,
    keys::STATUS,
    keys::VERSION,
    keys::CATEGORY,
];

impl<'o> RoleParser<'o> {
    fn new(options: &'o IdentityOptions) -> Self {
        Self {
            options,
            role: Role::new_empty(),
            warnings: Vec::new(),
            seen: HashSet::new(),
            raw_rules: Vec::new(),
            identity: None,
            reference: None,
        }
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn parse_enum<T>(&mut self, key: &str, value: &str, line_no: usize) -> Option<T>
    where
        T: FromStr,
    {
        let trimmed = value.trim();
        match T::from_str(trimmed).or_else(|_| T::from_str(&trimmed.to_lowercase())) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.warn(format!(
                    "Invalid value for {} on line {}: '{}', keeping default",
                    key, line_no, trimmed
                ));
                None
            }
        }
    }

    fn parse_bool(&mut self, key: &str, value: &str, line_no: usize) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            other => {
                self.warn(format!(
                    "Invalid value for {} on line {}: '{}', expected true or false",
                    key, line_no, other
                ));
                None
            }
        }
    }

    /// Parses an integer and clamps it into `min..=max`.
    fn parse_bounded(
        &mut self,
        key: &str,
        value: &str,
        line_no: usize,
        min: u8,
        max: u8,
    ) -> Option<u8> {
        let parsed = match value.trim().parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                self.warn(format!(
                    "Invalid value for {} on line {}: '{}', expected a number",
                    key,
                    line_no,
                    value.trim()
                ));
                return None;
            }
        };
        let clamped = parsed.clamp(i64::from(min), i64::from(max));
        if clamped != parsed {
            self.warn(format!(
                "{} {} on line {} is outside {}..={}, clamped to {}",
                key, parsed, line_no, min, max, clamped
            ));
        }
        u8::try_from(clamped).ok()
    }

    fn parse_timestamp(&mut self, key: &str, value: &str, line_no: usize) -> Option<DateTime<Utc>> {
        match DateTime::parse_from_rfc3339(value.trim()) {
            Ok(ts) => Some(ts.with_timezone(&Utc)),
            Err(_) => {
                self.warn(format!(
                    "Invalid timestamp for {} on line {}: '{}'",
                    key,
                    line_no,
                    value.trim()
                ));
                None
            }
        }
    }

    fn current_session(&mut self, line_no: usize) -> &mut Session {
        if self.role.journey.sessions.is_empty() {
            self.warn(format!(
                "session field on line {} appears before session.id, starting an unnamed session",
                line_no
            ));
            self.role.journey.sessions.push(Session::default());
        }
        let last = self.role.journey.sessions.len() - 1;
        &mut self.role.journey.sessions[last]
    }

    fn current_sub_role(&mut self, line_no: usize) -> &mut SubRole {
        if self.role.team.sub_roles.is_empty() {
            self.warn(format!(
                "subRole field on line {} appears before subRole.id, starting an unnamed sub-role",
                line_no
            ));
            self.role.team.sub_roles.push(SubRole::default());
        }
        let last = self.role.team.sub_roles.len() - 1;
        &mut self.role.team.sub_roles[last]
    }

    fn referral(&mut self) -> &mut ReferralProtocol {
        self.role
            .ethics
            .referral
            .get_or_insert_with(ReferralProtocol::default)
    }

    fn license(&mut self, line_no: usize) -> &mut LicenseInfo {
        if self.role.ethics.license.is_none() {
            self.warn(format!(
                "license field on line {} appears before license.type, assuming {}",
                line_no,
                crate::license::LicenseType::default()
            ));
        }
        self.role
            .ethics
            .license
            .get_or_insert_with(|| LicenseInfo::new(Default::default()))
    }

    fn memory_transfer(&mut self) -> &mut MemoryTransfer {
        self.role
            .team
            .memory_transfer
            .get_or_insert_with(MemoryTransfer::default)
    }

    fn pacing(&mut self) -> &mut Pacing {
        self.role.journey.pacing.get_or_insert_with(Pacing::default)
    }

    /// `[action] text` is the current shape only when `action` names an
    /// [`EthicalAction`]; anything else is a legacy bare rule kept verbatim.
    fn parse_ethical_rule(&mut self, value: String) {
        let bracketed = value
            .strip_prefix('[')
            .and_then(|rest| rest.split_once(']'))
            .and_then(|(action, rule)| {
                let action = action.trim();
                let action = EthicalAction::from_str(action)
                    .or_else(|_| EthicalAction::from_str(&action.to_lowercase()))
                    .ok()?;
                Some(EthicalRule {
                    rule: rule.strip_prefix(' ').unwrap_or(rule).to_string(),
                    action,
                })
            });
        let raw = match bracketed {
            Some(rule) => RawEthicalRule::Rule(rule),
            None => RawEthicalRule::Legacy(value),
        };
        self.raw_rules.push(raw);
    }

    fn field(&mut self, key: &str, raw_value: &str, line_no: usize) {
        let value = unescape(raw_value);
        match key {
            keys::RML_VERSION => {
                if !value.trim().starts_with("1.") && value.trim() != "1" {
                    self.warn(format!(
                        "Unsupported RML-VERSION '{}', parsing as {}",
                        value.trim(),
                        super::RML_FORMAT_VERSION
                    ));
                }
            }
            keys::IDENTITY => {
                if self.options.enabled {
                    let (parsed, unknown) = identity::parse_identity_value(&value);
                    for part in unknown {
                        self.warn(format!("Unrecognized identity component '{}' ignored", part));
                    }
                    self.identity = Some(parsed);
                }
            }
            keys::REFERENCE => {
                if self.options.enabled {
                    self.reference = Some(value);
                }
            }

            keys::ID => {
                self.seen.insert(keys::ID);
                if !value.trim().is_empty() {
                    self.role.id = value.trim().to_string();
                }
            }
            keys::CREATED_AT => {
                if let Some(ts) = self.parse_timestamp(key, &value, line_no) {
                    self.seen.insert(keys::CREATED_AT);
                    self.role.created_at = ts;
                }
            }
            keys::UPDATED_AT => {
                if let Some(ts) = self.parse_timestamp(key, &value, line_no) {
                    self.seen.insert(keys::UPDATED_AT);
                    self.role.updated_at = ts;
                }
            }

            keys::NAME => self.role.base.name = value,
            keys::ARCHETYPE => {
                if let Some(v) = self.parse_enum(key, &value, line_no) {
                    self.role.base.archetype = v;
                }
            }
            keys::ROLE_TYPE => {
                if let Some(v) = self.parse_enum(key, &value, line_no) {
                    self.role.base.role_type = v;
                }
            }
            keys::DESCRIPTION => self.role.base.description = value,
            keys::MAIN_GOAL => self.role.base.main_goal = value,
            keys::RESPONSE_LENGTH => {
                let (min, max) = RESPONSE_LENGTH_RANGE;
                if let Some(v) = self.parse_bounded(key, &value, line_no, min, max) {
                    self.role.base.response_length = v;
                }
            }
            keys::STATUS => {
                if let Some(v) = self.parse_enum(key, &value, line_no) {
                    self.seen.insert(keys::STATUS);
                    self.role.base.status = v;
                }
            }
            keys::VERSION => {
                let version = value.trim();
                if version.is_empty() {
                    return;
                }
                if semver::Version::parse(version).is_err() {
                    self.warn(format!(
                        "version '{}' on line {} is not a semantic version",
                        version, line_no
                    ));
                }
                self.seen.insert(keys::VERSION);
                self.role.base.version = version.to_string();
            }
            keys::CATEGORY => {
                if let Some(v) = self.parse_enum(key, &value, line_no) {
                    self.seen.insert(keys::CATEGORY);
                    self.role.base.category = v;
                }
            }
            keys::TAG => self.role.base.tags.push(value),

            keys::AGE_RANGE => self.role.portrait.age_range = value,
            keys::VISUAL_STYLE => self.role.portrait.visual_style = value,
            keys::VISUAL_ACCENT => self.role.portrait.visual_accent = value,
            keys::VISUAL_DETAILS => self.role.portrait.visual_details = value,
            keys::ENVIRONMENT => self.role.portrait.environment = value,
            keys::ATMOSPHERE => self.role.portrait.atmosphere = value,
            keys::IMAGE_STYLE => self.role.portrait.image_style = value,
            keys::LIGHTING => self.role.portrait.lighting = value,

            keys::GREETING => self.role.behavior.greeting = value,
            keys::TONE => {
                if let Some(v) = self.parse_enum(key, &value, line_no) {
                    self.role.behavior.tone = v;
                }
            }
            keys::EMOTIONAL_RANGE => {
                if let Some(v) = self.parse_enum(key, &value, line_no) {
                    self.role.behavior.emotional_range = v;
                }
            }
            keys::SHOULD_DO => self.role.behavior.should_do.push(value),
            keys::SHOULD_NOT_DO => self.role.behavior.should_not_do.push(value),

            keys::AREA => self.role.expertise.areas.push(value),
            keys::TOOL => self.role.expertise.tools.push(value),
            keys::OUTPUT_FORMAT => self.role.expertise.output_formats.push(value),
            keys::ADDITIONAL_RULES => self.role.expertise.additional_rules = value,

            keys::PACING_INTERVAL => self.pacing().recommended_interval = value,
            keys::PACING_MAX_PER_WEEK => {
                let parsed = self.parse_bounded(key, &value, line_no, 0, u8::MAX);
                let pacing = self.pacing();
                if let Some(v) = parsed {
                    pacing.max_sessions_per_week = v;
                }
            }
            keys::SESSION_ID => self.role.journey.sessions.push(Session {
                id: value,
                ..Session::default()
            }),
            keys::SESSION_TITLE => self.current_session(line_no).title = value,
            keys::SESSION_DURATION => {
                self.current_session(line_no).estimated_duration = Some(value)
            }
            keys::SESSION_TASK => self.current_session(line_no).tasks.push(value),
            keys::SESSION_OUTCOME => self.current_session(line_no).outcomes.push(value),

            keys::IS_TEAM => {
                if let Some(v) = self.parse_bool(key, &value, line_no) {
                    self.role.team.is_team = v;
                }
            }
            keys::ORCHESTRATOR => self.role.team.orchestrator = value,
            keys::SUB_ROLE_ID => self.role.team.sub_roles.push(SubRole {
                id: value,
                ..SubRole::default()
            }),
            keys::SUB_ROLE_NAME => self.current_sub_role(line_no).name = value,
            keys::SUB_ROLE_DESCRIPTION => self.current_sub_role(line_no).description = value,
            keys::HANDOFF_PROTOCOL => self.role.team.handoff_protocol = value,
            keys::TRANSFER_ENABLED => {
                let parsed = self.parse_bool(key, &value, line_no);
                let transfer = self.memory_transfer();
                if let Some(v) = parsed {
                    transfer.enabled = v;
                }
            }
            keys::TRANSFER_SCOPE => {
                let parsed = self.parse_enum(key, &value, line_no);
                let transfer = self.memory_transfer();
                if let Some(v) = parsed {
                    transfer.scope = v;
                }
            }

            keys::HOT_MEMORY => self.role.memory.hot = value,
            keys::WARM_MEMORY => self.role.memory.warm = value,
            keys::COLD_MEMORY => self.role.memory.cold = value,
            keys::COMPRESSION => {
                if let Some(v) = self.parse_enum(key, &value, line_no) {
                    self.role.memory.compression = v;
                }
            }
            keys::EMOTIONAL_STATE => self.role.memory.emotional_states.push(value),

            keys::ETHICAL_RULE => self.parse_ethical_rule(value),
            keys::REFERRAL_TRIGGER => self.referral().triggers.push(value),
            keys::REFERRAL_MESSAGE => self.referral().message = value,
            keys::DISCLAIMER => self.role.ethics.disclaimer = value,
            keys::AUTHOR => self.role.ethics.author = value,
            keys::CONTACTS => self.role.ethics.contacts = value,
            keys::CHANGELOG => self.role.ethics.changelog.push(value),
            keys::LICENSE_TYPE => {
                if let Some(license_type) = self.parse_enum(key, &value, line_no) {
                    let info = self
                        .role
                        .ethics
                        .license
                        .get_or_insert_with(|| LicenseInfo::new(license_type));
                    info.license_type = license_type;
                    info.terms = crate::license::license_terms(license_type);
                }
            }
            keys::LICENSE_ATTRIBUTION => self.license(line_no).attribution = Some(value),
            keys::LICENSE_EXPIRES_AT => match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
                Ok(date) => self.license(line_no).expires_at = Some(date),
                Err(_) => self.warn(format!(
                    "Invalid date for license.expiresAt on line {}: '{}'",
                    line_no,
                    value.trim()
                )),
            },

            other => {
                if let Some(trait_name) = other.strip_prefix(keys::PERSONALITY_PREFIX) {
                    if self.role.behavior.personality.get(trait_name).is_some() {
                        if let Some(v) = self.parse_bounded(key, &value, line_no, 0, TRAIT_MAX) {
                            if let Some(slot) = self.role.behavior.personality.get_mut(trait_name) {
                                *slot = v;
                            }
                        }
                        return;
                    }
                }
                self.warn(format!("Unknown field '{}' on line {} ignored", other, line_no));
            }
        }
    }

    /// Back-compat shims and defaults applied once every line was read.
    fn finish(mut self) -> (Role, Vec<String>) {
        let raw_rules = std::mem::take(&mut self.raw_rules);
        for raw in raw_rules {
            let rule = match raw {
                RawEthicalRule::Rule(rule) => rule,
                RawEthicalRule::Legacy(text) => {
                    self.warn(format!(
                        "Converted old ethicalRules format: \"{}\" now uses action 'warn'",
                        text
                    ));
                    EthicalRule::new(text, EthicalAction::Warn)
                }
            };
            self.role.ethics.ethical_rules.push(rule);
        }

        for key in TRACKED_KEYS {
            if self.seen.contains(key) {
                continue;
            }
            match key {
                keys::STATUS => self.warn("Missing status, defaulted to 'draft'"),
                keys::VERSION => self.warn(format!(
                    "Missing version, defaulted to '{}'",
                    DEFAULT_ROLE_VERSION
                )),
                keys::CATEGORY => self.warn("Missing category, defaulted to 'productivity'"),
                // id and timestamps keep the fresh values from Role::new_empty
                _ => {}
            }
        }
        if !self.seen.contains(keys::CREATED_AT) && self.seen.contains(keys::UPDATED_AT) {
            self.role.created_at = self.role.updated_at;
        }
        if self.role.id.trim().is_empty() {
            self.role.id = Uuid::new_v4().to_string();
        }

        match (self.identity.take(), self.reference.take()) {
            (Some(mut identity), reference) => {
                identity.reference = reference;
                self.role.identity = Some(identity);
            }
            (None, Some(reference)) => {
                self.role.identity = Some(RmlIdentity {
                    reference: Some(reference),
                    canonical: true,
                    ..RmlIdentity::default()
                });
            }
            (None, None) => {}
        }

        if self.options.enabled && self.options.validate {
            self.validate_identity();
        }

        (self.role, self.warnings)
    }

    fn validate_identity(&mut self) {
        match identity::verify_identity(&self.role) {
            IdentityCheck::Absent => {}
            IdentityCheck::Verified { full_id } => {
                self.warn(format!("RML identity verified: {}", full_id));
            }
            IdentityCheck::Mismatch { changed } => {
                self.warn(format!(
                    "RML identity mismatch: sections changed: {}",
                    changed.join(", ")
                ));
                if let Some(identity) = self.role.identity.as_mut() {
                    identity.canonical = false;
                }
            }
        }
    }
}

/// Parses RML text into a role.
///
/// Never fails: see [`ImportResult`] for how problems are reported.
pub fn parse_rml_role(text: &str, options: &CodecOptions) -> ImportResult {
    let mut parser = RoleParser::new(&options.identity);

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        match classify(raw) {
            Line::Blank | Line::Comment | Line::Header(_) => {}
            Line::Field(key, value) => parser.field(key, value, line_no),
            Line::Unrecognized => parser.warn(format!("Unrecognized line {} ignored", line_no)),
        }
    }

    let (role, warnings) = parser.finish();

    let mut errors = Vec::new();
    let missing = role.missing_required_fields();
    if !missing.is_empty() {
        errors.push(format!("Missing required fields: {}", missing.join(", ")));
    }

    ImportResult {
        is_valid: errors.is_empty(),
        role,
        warnings,
        errors,
    }
}
