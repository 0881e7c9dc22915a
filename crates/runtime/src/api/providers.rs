//! Abstraction for sourcing ally and enemy intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so encounters can
//! run with human input, scripted fixtures, or AI policies.
use combat_core::{ActionKind, CombatSession, CombatantId, ItemId, SkillId};

use super::errors::Result;

/// A decision: what to do and whom to do it to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionChoice {
    pub kind: ActionKind,
    pub target: Option<CombatantId>,
}

impl ActionChoice {
    pub fn new(kind: ActionKind, target: Option<CombatantId>) -> Self {
        Self { kind, target }
    }

    pub fn attack(target: CombatantId) -> Self {
        Self::new(ActionKind::Attack, Some(target))
    }

    pub fn skill(skill: impl Into<SkillId>, target: CombatantId) -> Self {
        Self::new(ActionKind::Skill(skill.into()), Some(target))
    }

    pub fn use_item(item: impl Into<ItemId>, target: CombatantId) -> Self {
        Self::new(ActionKind::UseItem(item.into()), Some(target))
    }

    pub fn flee() -> Self {
        Self::new(ActionKind::Flee, None)
    }
}

/// Trait for choosing an action for the combatant whose turn it is.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Enemy AI decisions
/// - Scripted/replayed actions
/// - Testing fixtures
///
/// Providers are evaluated synchronously and get read-only access to the
/// session, including its target and action queries.
pub trait ActionProvider {
    fn provide_action(&mut self, actor: CombatantId, session: &CombatSession)
    -> Result<ActionChoice>;
}

impl<F> ActionProvider for F
where
    F: FnMut(CombatantId, &CombatSession) -> ActionChoice,
{
    fn provide_action(
        &mut self,
        actor: CombatantId,
        session: &CombatSession,
    ) -> Result<ActionChoice> {
        Ok(self(actor, session))
    }
}
