//! Structured combat events.
//!
//! Every resolved action, round transition and termination is appended to the
//! [`EventLog`] as a tagged [`CombatEvent`]. Narration and animation consume
//! these records independently; nothing downstream parses text back into
//! numbers.

use crate::engine::Outcome;
use crate::state::{
    CombatantId, EffectSource, ItemId, Round, Side, SkillId, StatusEffectKind,
};

/// Health change caused by a ticking effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthChange {
    Damage(u32),
    Healing(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    RoundStarted {
        round: Round,
    },

    TurnStarted {
        actor: CombatantId,
        side: Side,
    },

    AttackResolved {
        actor: CombatantId,
        target: CombatantId,
        amount: u32,
        /// Target health after the hit.
        remaining: u32,
    },

    SkillUsed {
        actor: CombatantId,
        skill: SkillId,
        target: CombatantId,
        damage: Option<u32>,
        healing: Option<u32>,
        energy_spent: u32,
    },

    ItemUsed {
        actor: CombatantId,
        item: ItemId,
        target: CombatantId,
        healing: Option<u32>,
        energy_spent: u32,
    },

    EffectApplied {
        target: CombatantId,
        kind: StatusEffectKind,
        /// Magnitude after stacking.
        magnitude: u32,
        remaining: u32,
        source: EffectSource,
    },

    EffectsCleansed {
        target: CombatantId,
        removed: Vec<StatusEffectKind>,
    },

    EffectTicked {
        target: CombatantId,
        kind: StatusEffectKind,
        change: HealthChange,
    },

    EffectExpired {
        target: CombatantId,
        kind: StatusEffectKind,
    },

    CombatantDefeated {
        combatant: CombatantId,
    },

    Fled {
        actor: CombatantId,
        side: Side,
    },

    CombatEnded {
        outcome: Outcome,
    },
}

impl CombatEvent {
    /// Returns the snake_case tag of the event.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Self::RoundStarted { .. } => "round_started",
            Self::TurnStarted { .. } => "turn_started",
            Self::AttackResolved { .. } => "attack_resolved",
            Self::SkillUsed { .. } => "skill_used",
            Self::ItemUsed { .. } => "item_used",
            Self::EffectApplied { .. } => "effect_applied",
            Self::EffectsCleansed { .. } => "effects_cleansed",
            Self::EffectTicked { .. } => "effect_ticked",
            Self::EffectExpired { .. } => "effect_expired",
            Self::CombatantDefeated { .. } => "combatant_defeated",
            Self::Fled { .. } => "fled",
            Self::CombatEnded { .. } => "combat_ended",
        }
    }
}

/// An event with its position in the log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoggedEvent {
    /// Zero-based, gapless sequence number.
    pub sequence: u64,
    pub round: Round,
    pub event: CombatEvent,
}

/// Append-only, ordered event log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    entries: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn push(&mut self, round: Round, event: CombatEvent) -> &LoggedEvent {
        let sequence = self.entries.len() as u64;
        self.entries.push(LoggedEvent {
            sequence,
            round,
            event,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Sequence number the next event will receive.
    pub fn next_sequence(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Events with `sequence >= from`.
    pub fn since(&self, from: u64) -> &[LoggedEvent] {
        let start = usize::try_from(from)
            .unwrap_or(usize::MAX)
            .min(self.entries.len());
        &self.entries[start..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoggedEvent> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LoggedEvent> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
