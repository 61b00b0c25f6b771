//! Role -> RML text.

use chrono::SecondsFormat;

use super::keys;
use super::text::field;
use crate::identity;
use crate::role::Role;
use crate::step::StepId;

/// Format version written into every export.
pub const RML_FORMAT_VERSION: &str = "1.0";

const FILE_SUFFIX: &str = "_role.rml.txt";

/// Serializes a role into RML text.
///
/// Output is deterministic: field order is fixed and only depends on which
/// optional records are present.
pub fn export_role_to_text(role: &Role) -> String {
    let mut lines = vec![
        "# OpenRML role profile".to_string(),
        format!("{}: {}", keys::RML_VERSION, RML_FORMAT_VERSION),
    ];

    if let Some(identity) = &role.identity {
        if let Some(line) = identity::render_identity_line(identity) {
            lines.push(line);
        }
        if let Some(reference) = &identity.reference {
            lines.push(field(keys::REFERENCE, reference));
        }
    }

    lines.push(String::new());
    lines.push("[META]".to_string());
    lines.push(field(keys::ID, &role.id));
    lines.push(field(
        keys::CREATED_AT,
        &role.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    ));
    lines.push(field(
        keys::UPDATED_AT,
        &role.updated_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    ));

    for step in StepId::ALL {
        lines.push(String::new());
        lines.push(format!(
            "[STEP {}: {}]",
            step.number(),
            step.label().to_uppercase()
        ));
        lines.extend(section_lines(role, step));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Renders the field lines of one step, without its header.
///
/// Also the input of the identity section hashes.
pub(crate) fn section_lines(role: &Role, step: StepId) -> Vec<String> {
    let mut out = Vec::new();
    match step {
        StepId::Base => {
            let base = &role.base;
            out.push(field(keys::NAME, &base.name));
            out.push(field(keys::ARCHETYPE, &base.archetype.to_string()));
            out.push(field(keys::ROLE_TYPE, &base.role_type.to_string()));
            out.push(field(keys::DESCRIPTION, &base.description));
            out.push(field(keys::MAIN_GOAL, &base.main_goal));
            out.push(field(keys::RESPONSE_LENGTH, &base.response_length.to_string()));
            out.push(field(keys::STATUS, &base.status.to_string()));
            out.push(field(keys::VERSION, &base.version));
            out.push(field(keys::CATEGORY, &base.category.to_string()));
            push_list(&mut out, keys::TAG, &base.tags);
        }
        StepId::Portrait => {
            let p = &role.portrait;
            out.push(field(keys::AGE_RANGE, &p.age_range));
            out.push(field(keys::VISUAL_STYLE, &p.visual_style));
            out.push(field(keys::VISUAL_ACCENT, &p.visual_accent));
            out.push(field(keys::VISUAL_DETAILS, &p.visual_details));
            out.push(field(keys::ENVIRONMENT, &p.environment));
            out.push(field(keys::ATMOSPHERE, &p.atmosphere));
            out.push(field(keys::IMAGE_STYLE, &p.image_style));
            out.push(field(keys::LIGHTING, &p.lighting));
        }
        StepId::Behavior => {
            let b = &role.behavior;
            out.push(field(keys::GREETING, &b.greeting));
            out.push(field(keys::TONE, &b.tone.to_string()));
            out.push(field(keys::EMOTIONAL_RANGE, &b.emotional_range.to_string()));
            for (name, value) in b.personality.traits() {
                out.push(field(
                    &format!("{}{}", keys::PERSONALITY_PREFIX, name),
                    &value.to_string(),
                ));
            }
            push_list(&mut out, keys::SHOULD_DO, &b.should_do);
            push_list(&mut out, keys::SHOULD_NOT_DO, &b.should_not_do);
        }
        StepId::Expertise => {
            let e = &role.expertise;
            push_list(&mut out, keys::AREA, &e.areas);
            push_list(&mut out, keys::TOOL, &e.tools);
            push_list(&mut out, keys::OUTPUT_FORMAT, &e.output_formats);
            out.push(field(keys::ADDITIONAL_RULES, &e.additional_rules));
        }
        StepId::Journey => {
            let j = &role.journey;
            if let Some(pacing) = &j.pacing {
                out.push(field(keys::PACING_INTERVAL, &pacing.recommended_interval));
                out.push(field(
                    keys::PACING_MAX_PER_WEEK,
                    &pacing.max_sessions_per_week.to_string(),
                ));
            }
            for session in &j.sessions {
                out.push(field(keys::SESSION_ID, &session.id));
                out.push(field(keys::SESSION_TITLE, &session.title));
                if let Some(duration) = &session.estimated_duration {
                    out.push(field(keys::SESSION_DURATION, duration));
                }
                push_list(&mut out, keys::SESSION_TASK, &session.tasks);
                push_list(&mut out, keys::SESSION_OUTCOME, &session.outcomes);
            }
        }
        StepId::Team => {
            let t = &role.team;
            out.push(field(keys::IS_TEAM, &t.is_team.to_string()));
            out.push(field(keys::ORCHESTRATOR, &t.orchestrator));
            for sub in &t.sub_roles {
                out.push(field(keys::SUB_ROLE_ID, &sub.id));
                out.push(field(keys::SUB_ROLE_NAME, &sub.name));
                out.push(field(keys::SUB_ROLE_DESCRIPTION, &sub.description));
            }
            out.push(field(keys::HANDOFF_PROTOCOL, &t.handoff_protocol));
            if let Some(transfer) = &t.memory_transfer {
                out.push(field(keys::TRANSFER_ENABLED, &transfer.enabled.to_string()));
                out.push(field(keys::TRANSFER_SCOPE, &transfer.scope.to_string()));
            }
        }
        StepId::Memory => {
            let m = &role.memory;
            out.push(field(keys::HOT_MEMORY, &m.hot));
            out.push(field(keys::WARM_MEMORY, &m.warm));
            out.push(field(keys::COLD_MEMORY, &m.cold));
            out.push(field(keys::COMPRESSION, &m.compression.to_string()));
            push_list(&mut out, keys::EMOTIONAL_STATE, &m.emotional_states);
        }
        StepId::Ethics => {
            let e = &role.ethics;
            for rule in &e.ethical_rules {
                out.push(field(
                    keys::ETHICAL_RULE,
                    &format!("[{}] {}", rule.action, rule.rule),
                ));
            }
            if let Some(referral) = &e.referral {
                push_list(&mut out, keys::REFERRAL_TRIGGER, &referral.triggers);
                out.push(field(keys::REFERRAL_MESSAGE, &referral.message));
            }
            out.push(field(keys::DISCLAIMER, &e.disclaimer));
            out.push(field(keys::AUTHOR, &e.author));
            out.push(field(keys::CONTACTS, &e.contacts));
            push_list(&mut out, keys::CHANGELOG, &e.changelog);
            if let Some(license) = &e.license {
                out.push(field(keys::LICENSE_TYPE, &license.license_type.to_string()));
                if let Some(attribution) = &license.attribution {
                    out.push(field(keys::LICENSE_ATTRIBUTION, attribution));
                }
                if let Some(expires_at) = license.expires_at {
                    out.push(field(keys::LICENSE_EXPIRES_AT, &expires_at.to_string()));
                }
            }
        }
    }
    out
}

fn push_list(out: &mut Vec<String>, key: &str, items: &[String]) {
    out.extend(items.iter().map(|item| field(key, item)));
}

/// File name for an exported role: `<slug>_role.rml.txt`.
///
/// The slug is the lowercased name with non-alphanumerics dropped and
/// whitespace runs turned into `_`.
pub fn export_file_name(role: &Role) -> String {
    let mut slug = String::new();
    let mut pending_separator = false;
    for c in role.base.name.trim().chars() {
        if c.is_whitespace() {
            pending_separator = true;
        } else if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        }
    }
    if slug.is_empty() {
        slug.push_str("role");
    }
    format!("{}{}", slug, FILE_SUFFIX)
}
