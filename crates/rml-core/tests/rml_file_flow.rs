//! End-to-end flows over RML text: export, re-import, identity checks and
//! step-selective merging.

use std::collections::BTreeSet;

use rml_core::codec::{CodecOptions, export_role_to_text, parse_rml_role};
use rml_core::config::IdentityOptions;
use rml_core::identity::stamp_identity;
use rml_core::merge::merge_selected_steps;
use rml_core::role::{EthicalAction, Role};
use rml_core::step::{StepId, partition_import};
use rml_core::template::template_role;

fn stamped_coach() -> Role {
    let mut role = template_role("sleep-coach").unwrap();
    stamp_identity(&mut role);
    role
}

#[test]
fn test_stamped_role_verifies_after_roundtrip() {
    let role = stamped_coach();
    let text = export_role_to_text(&role);
    assert!(text.contains("IDENTITY: rml1-"));

    let result = parse_rml_role(&text, &CodecOptions::default());
    assert!(result.is_valid);
    let full_id = &role.identity.as_ref().unwrap().full_id;
    assert!(
        result
            .warnings
            .contains(&format!("RML identity verified: {}", full_id))
    );
    assert!(result.role.identity.as_ref().unwrap().canonical);
}

#[test]
fn test_hand_edited_file_reports_changed_section() {
    let text = export_role_to_text(&stamped_coach()).replace(
        "greeting: Good evening. How did last night go?",
        "greeting: Evening!",
    );

    let result = parse_rml_role(&text, &CodecOptions::default());
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w == "RML identity mismatch: sections changed: behavior")
    );
    assert!(!result.role.identity.as_ref().unwrap().canonical);

    let buckets = partition_import(&result);
    let ethics = buckets.iter().find(|b| b.step == StepId::Ethics).unwrap();
    assert!(ethics.warnings.iter().any(|w| w.contains("identity mismatch")));
}

#[test]
fn test_validation_disabled_skips_identity_warnings() {
    let options = CodecOptions {
        identity: IdentityOptions {
            enabled: true,
            validate: false,
        },
    };
    let text = export_role_to_text(&stamped_coach()).replace("evening", "morning");
    let result = parse_rml_role(&text, &options);
    assert!(result.warnings.iter().all(|w| !w.contains("identity")));
    assert!(result.role.identity.is_some());
}

#[test]
fn test_legacy_rules_are_upgraded_once() {
    let legacy = "name: Old\ndescription: From an early builder\nmainGoal: Keep working\n\
                  status: draft\nversion: 0.9.0\ncategory: health\n\
                  ethicalRule: No diagnoses\nethicalRule: [stop] No prescriptions\n";

    let first = parse_rml_role(legacy, &CodecOptions::default());
    assert_eq!(first.role.ethics.ethical_rules[0].action, EthicalAction::Warn);
    assert_eq!(first.role.ethics.ethical_rules[1].action, EthicalAction::Stop);
    assert!(
        first
            .warnings
            .contains(&"Converted old ethicalRules format: \"No diagnoses\" now uses action 'warn'".to_string())
    );

    let second = parse_rml_role(
        &export_role_to_text(&first.role),
        &CodecOptions::default(),
    );
    assert!(second.warnings.iter().all(|w| !w.starts_with("Converted")));
    assert_eq!(second.role.ethics, first.role.ethics);
}

#[test]
fn test_import_merge_only_touches_selected_steps() {
    let mut current = template_role("language-tutor").unwrap();
    current.memory.hot = "Learner prefers evening sessions".to_string();

    let incoming = parse_rml_role(
        &export_role_to_text(&template_role("sleep-coach").unwrap()),
        &CodecOptions::default(),
    );
    let buckets = partition_import(&incoming);
    let selected = BTreeSet::from([StepId::Behavior, StepId::Journey]);

    let merged = merge_selected_steps(&current, &buckets, &selected);

    assert_eq!(merged.behavior, incoming.role.behavior);
    assert_eq!(merged.journey, incoming.role.journey);
    assert_eq!(merged.base, current.base);
    assert_eq!(merged.memory, current.memory);
    assert_eq!(merged.ethics, current.ethics);
    assert_eq!(merged.id, current.id);
}
