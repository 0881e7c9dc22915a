//! Skills carried by combatants.

use std::fmt;

use crate::state::{ResourceMeter, StatusEffectKind};

/// Content identifier of a skill (e.g. `"field_dressing"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SkillId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status effect attached to the target when a skill resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTemplate {
    pub kind: StatusEffectKind,
    pub magnitude: u32,
    /// Round ticks the effect lasts.
    pub duration: u32,
}

impl EffectTemplate {
    pub fn new(kind: StatusEffectKind, magnitude: u32, duration: u32) -> Self {
        Self {
            kind,
            magnitude,
            duration,
        }
    }
}

/// An active ability with an energy cost and a round-based cooldown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub healing: Option<u32>,
    /// Reach of the skill in formation ranks. Carried for presentation and AI
    /// scoring; party combat has no positions to check it against.
    #[cfg_attr(feature = "serde", serde(default = "default_range"))]
    pub range: u32,
    /// Rounds the skill stays unavailable after use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    /// Rounds left before the skill may be used again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<EffectTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

#[cfg(feature = "serde")]
fn default_range() -> u32 {
    1
}

impl Skill {
    pub fn new(id: impl Into<SkillId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            energy_cost: 0,
            damage: None,
            healing: None,
            range: 1,
            cooldown: 0,
            current_cooldown: 0,
            effect: None,
            tags: Vec::new(),
        }
    }

    pub fn with_energy_cost(mut self, energy_cost: u32) -> Self {
        self.energy_cost = energy_cost;
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_healing(mut self, healing: u32) -> Self {
        self.healing = Some(healing);
        self
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_current_cooldown(mut self, current_cooldown: u32) -> Self {
        self.current_cooldown = current_cooldown;
        self
    }

    pub fn with_effect(mut self, effect: EffectTemplate) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Returns true when the cooldown has elapsed.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Returns true when the skill is off cooldown and `energy` covers its cost.
    pub fn is_selectable(&self, energy: &ResourceMeter) -> bool {
        self.is_ready() && energy.covers(self.energy_cost)
    }

    pub(crate) fn start_cooldown(&mut self) {
        self.current_cooldown = self.cooldown;
    }

    /// Decrements the remaining cooldown by one round, floored at zero.
    pub(crate) fn tick_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}
