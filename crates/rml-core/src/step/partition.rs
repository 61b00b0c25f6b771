//! Splits a role into the eight wizard steps.

use super::classify::classify_warnings;
use super::model::{StepBucket, StepFields, StepId};
use crate::codec::ImportResult;
use crate::role::Role;

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Whether `role` carries meaningful content for `step`.
///
/// Defaults do not count: an untouched personality vector or a session with
/// a blank title is not data.
pub fn step_has_data(role: &Role, step: StepId) -> bool {
    match step {
        StepId::Base => {
            let b = &role.base;
            filled(&b.name) || filled(&b.description) || filled(&b.main_goal)
        }
        StepId::Portrait => {
            let p = &role.portrait;
            [
                &p.age_range,
                &p.visual_style,
                &p.visual_accent,
                &p.visual_details,
                &p.environment,
                &p.atmosphere,
                &p.image_style,
                &p.lighting,
            ]
            .iter()
            .any(|v| filled(v))
        }
        StepId::Behavior => {
            let b = &role.behavior;
            filled(&b.greeting) || !b.should_do.is_empty() || !b.should_not_do.is_empty()
        }
        StepId::Expertise => {
            let e = &role.expertise;
            !e.areas.is_empty()
                || !e.tools.is_empty()
                || !e.output_formats.is_empty()
                || filled(&e.additional_rules)
        }
        StepId::Journey => role.journey.sessions.iter().any(|s| filled(&s.title)),
        StepId::Team => {
            let t = &role.team;
            t.is_team || filled(&t.orchestrator) || !t.sub_roles.is_empty()
        }
        StepId::Memory => {
            let m = &role.memory;
            filled(&m.hot) || filled(&m.warm) || filled(&m.cold) || !m.emotional_states.is_empty()
        }
        StepId::Ethics => {
            let e = &role.ethics;
            !e.ethical_rules.is_empty()
                || e.referral.is_some()
                || e.license.is_some()
                || !e.changelog.is_empty()
                || filled(&e.disclaimer)
                || filled(&e.author)
                || filled(&e.contacts)
        }
    }
}

/// Partitions `role` into exactly eight buckets, in step order.
pub fn partition_role(role: &Role) -> Vec<StepBucket> {
    StepId::all()
        .map(|step| StepBucket {
            step,
            label: step.label().to_string(),
            fields: StepFields::from_role(role, step),
            has_data: step_has_data(role, step),
            warnings: Vec::new(),
        })
        .collect()
}

/// Partitions an import result and routes its warnings to their steps.
pub fn partition_import(result: &ImportResult) -> Vec<StepBucket> {
    let mut routed = classify_warnings(&result.warnings);
    let mut buckets = partition_role(&result.role);
    for bucket in &mut buckets {
        if let Some(warnings) = routed.remove(&bucket.step) {
            bucket.warnings = warnings;
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{CodecOptions, parse_rml_role};
    use crate::role::{EthicalAction, EthicalRule, Session};

    fn session(title: &str) -> Session {
        Session {
            id: "s1".to_string(),
            title: title.to_string(),
            ..Session::default()
        }
    }

    #[test]
    fn test_empty_role_has_no_data_anywhere() {
        let buckets = partition_role(&Role::new_empty());
        assert_eq!(buckets.len(), 8);
        assert!(buckets.iter().all(|b| !b.has_data));
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Base", "Portrait", "Behavior", "Expertise", "Journey", "Team", "Memory", "Ethics"]
        );
    }

    #[test]
    fn test_journey_requires_titled_session() {
        let mut role = Role::new_empty();
        role.journey.sessions.push(session(""));
        assert!(!step_has_data(&role, StepId::Journey));

        role.journey.sessions.push(session("   "));
        assert!(!step_has_data(&role, StepId::Journey));

        role.journey.sessions.push(session("Kickoff"));
        assert!(step_has_data(&role, StepId::Journey));
    }

    #[test]
    fn test_default_personality_is_not_behavior_data() {
        let mut role = Role::new_empty();
        role.behavior.personality.humor = 9;
        assert!(!step_has_data(&role, StepId::Behavior));
        role.behavior.should_do.push("Ask follow-up questions".to_string());
        assert!(step_has_data(&role, StepId::Behavior));
    }

    #[test]
    fn test_each_bucket_carries_only_its_section() {
        let mut role = Role::new_empty();
        role.memory.hot = "Likes tea".to_string();
        role.ethics
            .ethical_rules
            .push(EthicalRule::new("Be kind", EthicalAction::Warn));

        let buckets = partition_role(&role);
        match &buckets[6].fields {
            StepFields::Memory(memory) => assert_eq!(memory.hot, "Likes tea"),
            other => panic!("unexpected fields: {:?}", other),
        }
        assert!(buckets[6].has_data);
        assert!(buckets[7].has_data);
        assert!(!buckets[5].has_data);
    }

    #[test]
    fn test_partition_import_routes_warnings() {
        let result = parse_rml_role(
            "name: A\ndescription: B\nmainGoal: C\nstatus: draft\nversion: 1.0.0\ncategory: health\ncompression: fuzzy\nethicalRule: Old style\n",
            &CodecOptions::default(),
        );
        let buckets = partition_import(&result);
        assert_eq!(buckets[6].warnings.len(), 1);
        assert!(buckets[6].warnings[0].contains("compression"));
        assert_eq!(buckets[7].warnings.len(), 1);
        assert!(buckets[0].warnings.is_empty());
    }
}
