//! RML identity: a content fingerprint for exported roles.
//!
//! Each wizard step is hashed separately (BLAKE3 over the step's rendered RML
//! lines) so a drift report can name the sections that changed. The full id
//! hashes the sorted `name=hash` pairs. This detects edits, it does not
//! authenticate anyone.

use std::collections::BTreeMap;

use crate::codec::section_lines;
use crate::codec::text::escape;
use crate::role::{RmlIdentity, Role};
use crate::step::StepId;

/// Prefix of every full identifier produced here.
pub const IDENTITY_PREFIX: &str = "rml1-";

const SECTION_HASH_LEN: usize = 16;
const FULL_HASH_LEN: usize = 32;
const NON_CANONICAL_MARKER: &str = "non-canonical";

/// Outcome of comparing a stored identity with the role's current content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityCheck {
    /// No fingerprint to check against
    Absent,
    Verified { full_id: String },
    Mismatch { changed: Vec<String> },
}

impl IdentityCheck {
    pub fn changed_sections(&self) -> &[String] {
        match self {
            IdentityCheck::Mismatch { changed } => changed,
            _ => &[],
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, IdentityCheck::Verified { .. })
    }
}

/// Hashes every step of `role`, keyed by the step's lowercase name.
pub fn section_hashes(role: &Role) -> BTreeMap<String, String> {
    StepId::ALL
        .iter()
        .map(|step| {
            let body = section_lines(role, *step).join("\n");
            let hash = blake3::hash(body.as_bytes());
            (
                step.key().to_string(),
                hash.to_hex()[..SECTION_HASH_LEN].to_string(),
            )
        })
        .collect()
}

fn full_id_of(sections: &BTreeMap<String, String>) -> String {
    let mut hasher = blake3::Hasher::new();
    for (name, hash) in sections {
        hasher.update(name.as_bytes());
        hasher.update(b"=");
        hasher.update(hash.as_bytes());
        hasher.update(b"\n");
    }
    format!(
        "{}{}",
        IDENTITY_PREFIX,
        &hasher.finalize().to_hex()[..FULL_HASH_LEN]
    )
}

/// Computes a fresh canonical identity for the role's current content.
pub fn compute_identity(role: &Role) -> RmlIdentity {
    let sections = section_hashes(role);
    RmlIdentity {
        full_id: full_id_of(&sections),
        sections,
        reference: None,
        canonical: true,
    }
}

/// Replaces the role's identity with one computed from its current content.
///
/// When the content changed since the last stamp, the previous full id
/// becomes the new reference so the lineage stays traceable. Returns `true`
/// when the identity changed.
pub fn stamp_identity(role: &mut Role) -> bool {
    let mut fresh = compute_identity(role);
    match role.identity.take() {
        Some(previous) if previous.full_id == fresh.full_id => {
            fresh.reference = previous.reference;
            role.identity = Some(fresh);
            false
        }
        Some(previous) if !previous.full_id.is_empty() => {
            fresh.reference = Some(previous.full_id);
            role.identity = Some(fresh);
            true
        }
        Some(previous) => {
            fresh.reference = previous.reference;
            role.identity = Some(fresh);
            true
        }
        None => {
            role.identity = Some(fresh);
            true
        }
    }
}

/// Compares the stored identity against the role's current content.
pub fn verify_identity(role: &Role) -> IdentityCheck {
    let Some(stored) = role.identity.as_ref().filter(|i| !i.full_id.is_empty()) else {
        return IdentityCheck::Absent;
    };

    let current = section_hashes(role);
    let changed: Vec<String> = current
        .iter()
        .filter(|(name, hash)| stored.sections.get(*name) != Some(*hash))
        .map(|(name, _)| name.clone())
        .collect();

    if !changed.is_empty() {
        return IdentityCheck::Mismatch { changed };
    }
    if full_id_of(&current) != stored.full_id {
        return IdentityCheck::Mismatch {
            changed: vec!["fingerprint".to_string()],
        };
    }
    IdentityCheck::Verified {
        full_id: stored.full_id.clone(),
    }
}

/// Renders the `IDENTITY:` line, or `None` when there is no full id.
pub fn render_identity_line(identity: &RmlIdentity) -> Option<String> {
    if identity.full_id.is_empty() {
        return None;
    }
    let mut parts = vec![escape(&identity.full_id)];
    parts.extend(
        identity
            .sections
            .iter()
            .map(|(name, hash)| format!("{}={}", name, hash)),
    );
    if !identity.canonical {
        parts.push(NON_CANONICAL_MARKER.to_string());
    }
    Some(format!("IDENTITY: {}", parts.join("; ")))
}

/// Parses the value of an `IDENTITY:` line.
///
/// Returns the identity plus any components that were not understood.
pub fn parse_identity_value(value: &str) -> (RmlIdentity, Vec<String>) {
    let mut parts = value.split(';').map(str::trim).filter(|p| !p.is_empty());
    let mut identity = RmlIdentity {
        full_id: parts.next().unwrap_or_default().to_string(),
        sections: BTreeMap::new(),
        reference: None,
        canonical: true,
    };
    let mut unknown = Vec::new();

    for part in parts {
        if part == NON_CANONICAL_MARKER {
            identity.canonical = false;
        } else if let Some((name, hash)) = part.split_once('=') {
            identity
                .sections
                .insert(name.trim().to_string(), hash.trim().to_string());
        } else {
            unknown.push(part.to_string());
        }
    }

    (identity, unknown)
}
