use std::collections::{BTreeMap, BTreeSet};

use crate::state::{StackPolicy, StatusEffectKind};

/// Combat configuration constants and tunable parameters.
///
/// Runtime-tunable values are plain data so content can be rebalanced
/// without code changes; capacity limits are compile-time constants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Floor applied to basic attack damage after defense is subtracted.
    pub minimum_damage: u32,

    /// Tag sets that classify skills and items as healing-class.
    pub targeting: TargetingConfig,

    /// Status effect stacking and per-round resolution.
    pub effects: EffectConfig,
}

impl CombatConfig {
    // ===== compile-time constants =====
    /// Maximum number of participants in a single encounter (both sides).
    pub const MAX_COMBATANTS: usize = 16;
    pub const MAX_SKILLS: usize = 8;
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MINIMUM_DAMAGE: u32 = 1;

    pub fn new() -> Self {
        Self {
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
            targeting: TargetingConfig::default(),
            effects: EffectConfig::default(),
        }
    }

    pub fn with_minimum_damage(mut self, minimum_damage: u32) -> Self {
        self.minimum_damage = minimum_damage.max(1);
        self
    }

    /// Returns the minimum damage, never below one.
    pub fn minimum_damage(&self) -> u32 {
        self.minimum_damage.max(1)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity tags that mark an action as healing-class.
///
/// A skill is healing-class when it carries a healing value, or when its id
/// or any of its tags is listed in `healing_tags`. An item is healing-class
/// when its effect is restorative, or when its id or any of its tags is listed
/// in `restorative_item_tags`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TargetingConfig {
    pub healing_tags: BTreeSet<String>,
    pub restorative_item_tags: BTreeSet<String>,
}

impl TargetingConfig {
    pub fn is_healing_tag(&self, tag: &str) -> bool {
        self.healing_tags.contains(tag)
    }

    pub fn is_restorative_tag(&self, tag: &str) -> bool {
        self.restorative_item_tags.contains(tag)
    }
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            healing_tags: ["heal", "restore", "support"]
                .into_iter()
                .map(String::from)
                .collect(),
            restorative_item_tags: ["restorative", "medical"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Status effect policies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectConfig {
    /// Policy used for kinds without an explicit entry in `stacking`.
    pub default_stacking: StackPolicy,

    /// Per-kind override of the stacking policy.
    pub stacking: BTreeMap<StatusEffectKind, StackPolicy>,

    /// Whether damage/healing-over-time effects resolve on each round wrap.
    pub tick_on_round_wrap: bool,
}

impl EffectConfig {
    /// Returns the stacking policy for an effect kind.
    pub fn policy_for(&self, kind: StatusEffectKind) -> StackPolicy {
        self.stacking
            .get(&kind)
            .copied()
            .unwrap_or(self.default_stacking)
    }

    pub fn with_policy(mut self, kind: StatusEffectKind, policy: StackPolicy) -> Self {
        self.stacking.insert(kind, policy);
        self
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        let stacking = [
            (StatusEffectKind::Poisoned, StackPolicy::Stack),
            (StatusEffectKind::Burning, StackPolicy::Stack),
        ]
        .into_iter()
        .collect();

        Self {
            default_stacking: StackPolicy::Refresh,
            stacking,
            tick_on_round_wrap: true,
        }
    }
}
