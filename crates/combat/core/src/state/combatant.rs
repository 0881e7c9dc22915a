//! Combatant state.

use crate::state::{
    CombatantId, ResourceMeter, Side, Skill, SkillId, StatusEffectKind, StatusEffects,
};

/// Offensive and defensive stats used by basic attacks and initiative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatStats {
    pub attack: u32,
    pub defense: u32,
    /// Only consulted by stat-driven turn order policies.
    pub initiative: u32,
}

impl CombatStats {
    pub const fn new(attack: u32, defense: u32) -> Self {
        Self {
            attack,
            defense,
            initiative: 0,
        }
    }

    pub const fn with_initiative(mut self, initiative: u32) -> Self {
        self.initiative = initiative;
        self
    }
}

/// A participant in an encounter, ally or enemy.
///
/// # Invariants
///
/// - `health` and `energy` stay within `[0, maximum]` (enforced by
///   [`ResourceMeter`])
/// - a combatant with zero health is defeated: it never acts and is never a
///   legal target
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub health: ResourceMeter,
    pub energy: ResourceMeter,
    pub stats: CombatStats,
    pub skills: Vec<Skill>,
    pub status_effects: StatusEffects,
}

impl Combatant {
    /// Creates a combatant at full health and energy with no skills.
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        side: Side,
        max_health: u32,
        max_energy: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            health: ResourceMeter::full(max_health),
            energy: ResourceMeter::full(max_energy),
            stats: CombatStats::default(),
            skills: Vec::new(),
            status_effects: StatusEffects::empty(),
        }
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn with_skills(mut self, skills: impl IntoIterator<Item = Skill>) -> Self {
        self.skills.extend(skills);
        self
    }

    /// Sets current health (clamped to the maximum).
    pub fn with_health(mut self, current: u32) -> Self {
        self.health = ResourceMeter::new(current, self.health.maximum());
        self
    }

    /// Sets current energy (clamped to the maximum).
    pub fn with_energy(mut self, current: u32) -> Self {
        self.energy = ResourceMeter::new(current, self.energy.maximum());
        self
    }

    /// Quick check if the combatant can still act or be targeted.
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|skill| &skill.id == id)
    }

    pub fn skill_mut(&mut self, id: &SkillId) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|skill| &skill.id == id)
    }

    /// Attack after `Empowered`/`Weakened` modifiers.
    pub fn effective_attack(&self) -> u32 {
        let effects = &self.status_effects;
        self.stats
            .attack
            .saturating_add(effects.magnitude_of(StatusEffectKind::Empowered))
            .saturating_sub(effects.magnitude_of(StatusEffectKind::Weakened))
    }

    /// Defense after `Fortified`/`Exposed` modifiers.
    pub fn effective_defense(&self) -> u32 {
        let effects = &self.status_effects;
        self.stats
            .defense
            .saturating_add(effects.magnitude_of(StatusEffectKind::Fortified))
            .saturating_sub(effects.magnitude_of(StatusEffectKind::Exposed))
    }
}
