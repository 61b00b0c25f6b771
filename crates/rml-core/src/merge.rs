//! Partial merge of selected wizard steps onto an existing role.
//!
//! Only the sections of selected steps are ever written. The role's id,
//! identity block and timestamps are never touched by a merge.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::role::{
    BaseSection, BehaviorSection, EthicsSection, ExpertiseSection, JourneySection, MemorySection,
    PortraitSection, Role, TeamSection,
};
use crate::step::{StepBucket, StepFields, StepId};

/// A sparse role: one optional section per step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RolePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<BaseSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portrait: Option<PortraitSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<BehaviorSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise: Option<ExpertiseSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journey: Option<JourneySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemorySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethics: Option<EthicsSection>,
}

impl RolePatch {
    pub fn is_empty(&self) -> bool {
        self.touched_steps().is_empty()
    }

    /// Sets the section carried by `fields`, replacing any previous value.
    pub fn insert(&mut self, fields: StepFields) {
        match fields {
            StepFields::Base(s) => self.base = Some(s),
            StepFields::Portrait(s) => self.portrait = Some(s),
            StepFields::Behavior(s) => self.behavior = Some(s),
            StepFields::Expertise(s) => self.expertise = Some(s),
            StepFields::Journey(s) => self.journey = Some(s),
            StepFields::Team(s) => self.team = Some(s),
            StepFields::Memory(s) => self.memory = Some(s),
            StepFields::Ethics(s) => self.ethics = Some(s),
        }
    }

    /// Combines two patches; sections present in `other` win.
    pub fn merge(self, other: RolePatch) -> RolePatch {
        RolePatch {
            base: other.base.or(self.base),
            portrait: other.portrait.or(self.portrait),
            behavior: other.behavior.or(self.behavior),
            expertise: other.expertise.or(self.expertise),
            journey: other.journey.or(self.journey),
            team: other.team.or(self.team),
            memory: other.memory.or(self.memory),
            ethics: other.ethics.or(self.ethics),
        }
    }

    /// Steps this patch would write, in step order.
    pub fn touched_steps(&self) -> Vec<StepId> {
        let present = [
            (StepId::Base, self.base.is_some()),
            (StepId::Portrait, self.portrait.is_some()),
            (StepId::Behavior, self.behavior.is_some()),
            (StepId::Expertise, self.expertise.is_some()),
            (StepId::Journey, self.journey.is_some()),
            (StepId::Team, self.team.is_some()),
            (StepId::Memory, self.memory.is_some()),
            (StepId::Ethics, self.ethics.is_some()),
        ];
        present
            .into_iter()
            .filter(|(_, is_set)| *is_set)
            .map(|(step, _)| step)
            .collect()
    }

    /// Shallow-merges the patch onto `role`.
    pub fn apply_to(&self, role: &mut Role) {
        if let Some(s) = &self.base {
            role.base = s.clone();
        }
        if let Some(s) = &self.portrait {
            role.portrait = s.clone();
        }
        if let Some(s) = &self.behavior {
            role.behavior = s.clone();
        }
        if let Some(s) = &self.expertise {
            role.expertise = s.clone();
        }
        if let Some(s) = &self.journey {
            role.journey = s.clone();
        }
        if let Some(s) = &self.team {
            role.team = s.clone();
        }
        if let Some(s) = &self.memory {
            role.memory = s.clone();
        }
        if let Some(s) = &self.ethics {
            role.ethics = s.clone();
        }
    }
}

/// Folds the buckets of the selected steps left to right into one patch.
///
/// Later buckets win when two carry the same step.
pub fn collect_selected(buckets: &[StepBucket], selected: &BTreeSet<StepId>) -> RolePatch {
    buckets
        .iter()
        .filter(|bucket| selected.contains(&bucket.step))
        .fold(RolePatch::default(), |mut patch, bucket| {
            patch.insert(bucket.fields.clone());
            patch
        })
}

/// Returns `current` with the selected steps replaced from `buckets`.
pub fn merge_selected_steps(
    current: &Role,
    buckets: &[StepBucket],
    selected: &BTreeSet<StepId>,
) -> Role {
    let mut merged = current.clone();
    collect_selected(buckets, selected).apply_to(&mut merged);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::CompressionStrategy;
    use crate::step::partition_role;

    fn current_role() -> Role {
        let mut role = Role::new_empty();
        role.base.name = "Current".to_string();
        role.behavior.greeting = "Hi there".to_string();
        role.memory.hot = "User is vegetarian".to_string();
        role.memory.warm = "Working on a thesis".to_string();
        role.memory.compression = CompressionStrategy::Emotional;
        role.memory.emotional_states = vec!["calm".to_string()];
        role
    }

    fn imported_role() -> Role {
        let mut role = Role::new_empty();
        role.base.name = "Imported".to_string();
        role.behavior.greeting = "Welcome back".to_string();
        role.memory.hot = "Should never land".to_string();
        role
    }

    #[test]
    fn test_merging_behavior_leaves_memory_untouched() {
        let current = current_role();
        let buckets = partition_role(&imported_role());
        let selected = BTreeSet::from([StepId::Behavior]);

        let merged = merge_selected_steps(&current, &buckets, &selected);

        assert_eq!(merged.behavior.greeting, "Welcome back");
        assert_eq!(merged.memory, current.memory);
        assert_eq!(merged.base, current.base);
        assert_eq!(merged.id, current.id);
        assert_eq!(merged.updated_at, current.updated_at);
    }

    #[test]
    fn test_empty_selection_is_identity() {
        let current = current_role();
        let buckets = partition_role(&imported_role());
        let merged = merge_selected_steps(&current, &buckets, &BTreeSet::new());
        assert_eq!(merged, current);
    }

    #[test]
    fn test_later_bucket_wins_on_collision() {
        let mut first = imported_role();
        first.behavior.greeting = "First".to_string();
        let mut second = imported_role();
        second.behavior.greeting = "Second".to_string();

        let mut buckets = partition_role(&first);
        buckets.extend(partition_role(&second));

        let patch = collect_selected(&buckets, &BTreeSet::from([StepId::Behavior]));
        assert_eq!(patch.behavior.unwrap().greeting, "Second");
    }

    #[test]
    fn test_patch_merge_prefers_right_side() {
        let mut left = RolePatch::default();
        left.insert(StepFields::from_role(&current_role(), StepId::Memory));
        left.insert(StepFields::from_role(&current_role(), StepId::Base));
        let mut right = RolePatch::default();
        right.insert(StepFields::from_role(&imported_role(), StepId::Base));

        let merged = left.merge(right);
        assert_eq!(merged.base.as_ref().unwrap().name, "Imported");
        assert_eq!(merged.memory.as_ref().unwrap().hot, "User is vegetarian");
        assert_eq!(merged.touched_steps(), vec![StepId::Base, StepId::Memory]);
    }

    #[test]
    fn test_empty_patch() {
        assert!(RolePatch::default().is_empty());
    }
}
