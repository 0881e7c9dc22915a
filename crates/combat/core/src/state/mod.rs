//! Authoritative combat state representation.
//!
//! [`CombatState`] aggregates the participants, turn bookkeeping, consumable
//! pools and the structured event log of a single encounter. It is created by
//! the session manager, mutated only through the engine, and discarded once
//! the encounter terminates.
mod combatant;
mod common;
mod consumables;
mod error;
mod skill;
mod status;
mod turn;

pub use combatant::{CombatStats, Combatant};
pub use common::{CombatantId, ResourceMeter, Round, Side};
pub use consumables::{ConsumablePool, Consumables, ItemId};
pub use error::InitializationError;
pub use skill::{EffectTemplate, Skill, SkillId};
pub use status::{
    EffectOrigin, EffectSource, StackPolicy, StatusEffect, StatusEffectKind, StatusEffects,
};
pub use turn::TurnState;

use crate::event::{CombatEvent, EventLog, LoggedEvent};

/// Canonical snapshot of an encounter.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    /// All combatants in the order the encounter owner supplied them.
    pub participants: Vec<Combatant>,

    /// Turn order, current turn and round counter.
    pub turn: TurnState,

    /// Shared consumable stock per side.
    pub consumables: Consumables,

    /// Append-only record of everything that happened.
    pub log: EventLog,
}

impl CombatState {
    pub fn new(participants: Vec<Combatant>, turn: TurnState, consumables: Consumables) -> Self {
        Self {
            participants,
            turn,
            consumables,
            log: EventLog::default(),
        }
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.participants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.participants.iter_mut().find(|c| c.id == id)
    }

    /// The combatant whose turn it is.
    pub fn current_actor(&self) -> Option<&Combatant> {
        self.turn
            .current_slot()
            .and_then(|slot| self.participants.get(slot))
    }

    pub fn current_actor_id(&self) -> Option<CombatantId> {
        self.current_actor().map(|c| c.id)
    }

    pub fn members(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.participants.iter().filter(move |c| c.side == side)
    }

    pub fn living(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.members(side).filter(|c| c.is_alive())
    }

    /// Returns true if at least one member of `side` has health above zero.
    pub fn side_alive(&self, side: Side) -> bool {
        self.living(side).next().is_some()
    }

    /// Appends an event stamped with the current round.
    pub fn record(&mut self, event: CombatEvent) -> &LoggedEvent {
        self.log.push(self.turn.round, event)
    }

    /// Returns true if every health and energy meter is within bounds.
    pub fn resources_consistent(&self) -> bool {
        self.participants
            .iter()
            .all(|c| c.health.is_consistent() && c.energy.is_consistent())
    }
}
