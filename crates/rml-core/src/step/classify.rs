//! Routes free-text import warnings to the wizard step they concern.
//!
//! Best-effort UX grouping. Rules are tried in table order and the first
//! match wins, so the more specific vocabularies come first (`memoryTransfer`
//! is a team setting, not a memory one). Anything unmatched lands on
//! [`StepId::Base`].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::StepId;

/// Step that receives warnings no rule matched.
pub const FALLBACK_STEP: StepId = StepId::Base;

const RULES: &[(StepId, &[&str])] = &[
    (
        StepId::Ethics,
        &[
            r"ethic",
            r"referral",
            r"disclaimer",
            r"\bauthor\b",
            r"contacts?\b",
            r"changelog",
            r"license",
            r"identity",
            r"\breference\b",
        ],
    ),
    (
        StepId::Team,
        &[r"memoryTransfer", r"sub-?role", r"orchestrator", r"handoff", r"\b(is)?team\b"],
    ),
    (
        StepId::Journey,
        &[r"session", r"journey", r"pacing", r"outcome"],
    ),
    (
        StepId::Memory,
        &[r"memory", r"compression", r"emotional ?states?"],
    ),
    (
        StepId::Behavior,
        &[
            r"greeting",
            r"\btone\b",
            r"emotional ?range",
            r"personality",
            r"should ?(not ?)?do",
        ],
    ),
    (
        StepId::Expertise,
        &[r"expertise", r"\barea\b", r"\btool\b", r"output ?format", r"additional ?rules"],
    ),
    (
        StepId::Portrait,
        &[
            r"portrait",
            r"age ?range",
            r"visual",
            r"environment",
            r"atmosphere",
            r"image ?style",
            r"lighting",
        ],
    ),
    (
        StepId::Base,
        &[
            r"\bname\b",
            r"archetype",
            r"role ?type",
            r"description",
            r"main ?goal",
            r"response ?length",
            r"\bstatus\b",
            r"\bversion\b",
            r"category",
            r"\btags?\b",
        ],
    ),
];

static MATCHERS: Lazy<Vec<(StepId, Vec<Regex>)>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|(step, patterns)| {
            let regexes = patterns
                .iter()
                .map(|p| Regex::new(&format!("(?i){}", p)).expect("warning classifier pattern"))
                .collect();
            (*step, regexes)
        })
        .collect()
});

/// Returns the step a single warning belongs to.
pub fn classify_warning(warning: &str) -> StepId {
    MATCHERS
        .iter()
        .find(|(_, regexes)| regexes.iter().any(|re| re.is_match(warning)))
        .map(|(step, _)| *step)
        .unwrap_or(FALLBACK_STEP)
}

/// Buckets warnings by step, preserving their relative order.
pub fn classify_warnings(warnings: &[String]) -> BTreeMap<StepId, Vec<String>> {
    let mut routed: BTreeMap<StepId, Vec<String>> = BTreeMap::new();
    for warning in warnings {
        routed
            .entry(classify_warning(warning))
            .or_default()
            .push(warning.clone());
    }
    routed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(MATCHERS.len(), RULES.len());
    }

    #[test]
    fn test_codec_warnings_reach_their_steps() {
        let cases = [
            ("Missing status, defaulted to 'draft'", StepId::Base),
            ("Missing category, defaulted to 'productivity'", StepId::Base),
            ("Invalid value for visualStyle on line 3: ''", StepId::Portrait),
            ("personality.humor 14 on line 9 is outside 0..=10, clamped to 10", StepId::Behavior),
            ("Invalid value for tone on line 4: 'grumpy', keeping default", StepId::Behavior),
            ("Unknown field 'outputFormats' on line 2 ignored", StepId::Expertise),
            ("session field on line 7 appears before session.id", StepId::Journey),
            ("Invalid value for memoryTransfer.scope on line 5: 'all'", StepId::Team),
            ("Invalid value for compression on line 5: 'zip'", StepId::Memory),
            ("Converted old ethicalRules format: \"Be kind\" now uses action 'warn'", StepId::Ethics),
            ("RML identity mismatch: sections changed: memory", StepId::Ethics),
        ];
        for (warning, expected) in cases {
            assert_eq!(classify_warning(warning), expected, "{}", warning);
        }
    }

    #[test]
    fn test_unmatched_warning_falls_back_to_base() {
        assert_eq!(classify_warning("Unrecognized line 12 ignored"), FALLBACK_STEP);
        assert_eq!(classify_warning(""), FALLBACK_STEP);
    }

    #[test]
    fn test_classify_warnings_keeps_order() {
        let warnings = vec![
            "Missing status, defaulted to 'draft'".to_string(),
            "Unrecognized line 1 ignored".to_string(),
            "Invalid value for tone on line 2: 'x', keeping default".to_string(),
        ];
        let routed = classify_warnings(&warnings);
        assert_eq!(routed[&StepId::Base], vec![warnings[0].clone(), warnings[1].clone()]);
        assert_eq!(routed[&StepId::Behavior], vec![warnings[2].clone()]);
        assert!(!routed.contains_key(&StepId::Memory));
    }
}
