//! Status effect system for combatants.
//!
//! Status effects are timed modifiers attached to a combatant: damage or
//! healing over time and offensive/defensive stat shifts.
//!
//! # Round-based Duration
//!
//! Effects store `remaining` round ticks. Durations only decay inside the turn
//! scheduler's round wrap ([`StatusEffects::decay`]); action resolution never
//! expires effects. An effect reaching zero is removed in the same pass, so no
//! action ever observes an effect with `remaining == 0`.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::{CombatantId, ItemId, SkillId};

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum StatusEffectKind {
    // ========================================================================
    // Damage / healing over time (resolved on round wrap)
    // ========================================================================
    /// Loses `magnitude` health per round.
    Poisoned,

    /// Loses `magnitude` health per round.
    Burning,

    /// Recovers `magnitude` health per round.
    Regenerating,

    // ========================================================================
    // Stat modifiers (applied while active)
    // ========================================================================
    /// Attack increased by `magnitude`.
    Empowered,

    /// Attack reduced by `magnitude`.
    Weakened,

    /// Defense increased by `magnitude`.
    Fortified,

    /// Defense reduced by `magnitude`.
    Exposed,
}

impl StatusEffectKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Returns true for harmful effects (removed by cleanse).
    pub const fn is_debuff(self) -> bool {
        matches!(
            self,
            Self::Poisoned | Self::Burning | Self::Weakened | Self::Exposed
        )
    }

    /// Returns true for kinds that deal damage on each round wrap.
    pub const fn is_damage_over_time(self) -> bool {
        matches!(self, Self::Poisoned | Self::Burning)
    }

    pub const fn is_healing_over_time(self) -> bool {
        matches!(self, Self::Regenerating)
    }
}

/// How a new effect combines with an existing effect of the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StackPolicy {
    /// Magnitudes add; the longer of the two durations is kept.
    Stack,

    /// Duration resets to the incoming duration; the incoming magnitude
    /// replaces the old one.
    #[default]
    Refresh,
}

/// What produced an effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectOrigin {
    Skill(SkillId),
    Item(ItemId),
}

/// Attribution of an effect to the acting combatant and its skill or item.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSource {
    pub actor: CombatantId,
    pub origin: EffectOrigin,
}

impl EffectSource {
    pub fn skill(actor: CombatantId, skill: SkillId) -> Self {
        Self {
            actor,
            origin: EffectOrigin::Skill(skill),
        }
    }

    pub fn item(actor: CombatantId, item: ItemId) -> Self {
        Self {
            actor,
            origin: EffectOrigin::Item(item),
        }
    }
}

/// A single active status effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Round ticks left before the effect expires.
    pub remaining: u32,
    pub magnitude: u32,
    pub source: EffectSource,
}

/// Active status effects on a combatant, in application order.
///
/// At most one entry exists per kind; re-applying a kind merges according to
/// the configured [`StackPolicy`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.get(kind).is_some()
    }

    /// Magnitude of the active effect of `kind`, or zero.
    pub fn magnitude_of(&self, kind: StatusEffectKind) -> u32 {
        self.get(kind).map_or(0, |e| e.magnitude)
    }

    /// Applies an effect, merging with an existing one of the same kind.
    ///
    /// Returns the resulting effect, or `None` if the effect was dropped
    /// (zero duration, or no capacity left for a new kind).
    pub fn apply(&mut self, effect: StatusEffect, policy: StackPolicy) -> Option<&StatusEffect> {
        if effect.remaining == 0 {
            return None;
        }

        if let Some(position) = self.effects.iter().position(|e| e.kind == effect.kind) {
            let existing = &mut self.effects[position];
            match policy {
                StackPolicy::Stack => {
                    existing.magnitude = existing.magnitude.saturating_add(effect.magnitude);
                    existing.remaining = existing.remaining.max(effect.remaining);
                }
                StackPolicy::Refresh => {
                    existing.magnitude = effect.magnitude;
                    existing.remaining = effect.remaining;
                }
            }
            existing.source = effect.source;
            return Some(&self.effects[position]);
        }

        self.effects.try_push(effect).ok()?;
        self.effects.last()
    }

    /// Removes an effect immediately.
    pub fn remove(&mut self, kind: StatusEffectKind) -> Option<StatusEffect> {
        let position = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(position))
    }

    /// Removes every debuff and returns the removed kinds in list order.
    pub fn cleanse(&mut self) -> Vec<StatusEffectKind> {
        let removed = self
            .effects
            .iter()
            .filter(|e| e.kind.is_debuff())
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| !e.kind.is_debuff());
        removed
    }

    /// Decrements every effect by one round tick and removes the ones that
    /// reach zero. Returns the expired kinds in list order.
    pub fn decay(&mut self) -> Vec<StatusEffectKind> {
        for effect in self.effects.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
        }

        let expired = self
            .effects
            .iter()
            .filter(|e| e.remaining == 0)
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| e.remaining > 0);
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
