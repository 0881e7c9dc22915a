//! Combat actions and their transitions.
//!
//! Every action a combatant can take is described by an [`ActionKind`] and
//! resolved by a dedicated [`ActionTransition`]:
//!
//! - `attack`: basic attack against an opposing combatant
//! - `skill`: energy-costed, cooldown-gated skills
//! - `item`: consumables drawn from the acting side's shared pool
//! - `flee`: ends the encounter for the acting side
//!
//! Target legality lives in `targeting`, the menu query in `available`.
mod attack;
mod available;
mod error;
mod flee;
mod item;
mod skill;
mod targeting;

pub use attack::AttackAction;
pub use available::available_actions;
pub use error::{ActionError, ErrorClass};
pub use flee::FleeAction;
pub use item::UseItemAction;
pub use skill::UseSkillAction;
pub use targeting::{TargetClass, classify, item_class, legal_targets, skill_class};

pub(crate) use targeting::validate_target;

use crate::env::CombatEnv;
use crate::state::{CombatState, Combatant, CombatantId, ItemId, Side, SkillId};

/// What a combatant intends to do on its turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    Attack,
    Skill(SkillId),
    UseItem(ItemId),
    Flee,
}

impl ActionKind {
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            ActionKind::Attack => "attack",
            ActionKind::Skill(_) => "skill",
            ActionKind::UseItem(_) => "use_item",
            ActionKind::Flee => "flee",
        }
    }
}

/// A fully specified request: who acts, how, and against whom.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatAction {
    pub actor: CombatantId,
    pub kind: ActionKind,
    pub target: Option<CombatantId>,
}

impl CombatAction {
    pub fn new(actor: CombatantId, kind: ActionKind, target: Option<CombatantId>) -> Self {
        Self {
            actor,
            kind,
            target,
        }
    }

    pub fn attack(actor: CombatantId, target: CombatantId) -> Self {
        Self::new(actor, ActionKind::Attack, Some(target))
    }

    pub fn skill(actor: CombatantId, skill: impl Into<SkillId>, target: CombatantId) -> Self {
        Self::new(actor, ActionKind::Skill(skill.into()), Some(target))
    }

    pub fn use_item(actor: CombatantId, item: impl Into<ItemId>, target: CombatantId) -> Self {
        Self::new(actor, ActionKind::UseItem(item.into()), Some(target))
    }

    pub fn flee(actor: CombatantId) -> Self {
        Self::new(actor, ActionKind::Flee, None)
    }
}

/// What an action actually did, as seen by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Attack {
        target: CombatantId,
        damage: u32,
        defeated: bool,
    },
    Skill {
        skill: SkillId,
        target: CombatantId,
        damage: Option<u32>,
        healing: Option<u32>,
        defeated: bool,
    },
    UseItem {
        item: ItemId,
        target: CombatantId,
        healing: Option<u32>,
    },
    Fled {
        side: Side,
    },
}

impl ActionResult {
    pub fn target(&self) -> Option<CombatantId> {
        match self {
            ActionResult::Attack { target, .. }
            | ActionResult::Skill { target, .. }
            | ActionResult::UseItem { target, .. } => Some(*target),
            ActionResult::Fled { .. } => None,
        }
    }
}

/// Defines how a concrete action mutates combat state.
///
/// The engine drives every transition through
/// `pre_validate → apply → post_validate` and restores the prior state if any
/// phase fails.
pub trait ActionTransition {
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &CombatState, _env: &CombatEnv<'_>) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the action by mutating the state directly.
    fn apply(
        &self,
        state: &mut CombatState,
        env: &CombatEnv<'_>,
    ) -> Result<Self::Result, ActionError>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, state: &CombatState, _env: &CombatEnv<'_>) -> Result<(), ActionError> {
        if state.resources_consistent() {
            Ok(())
        } else {
            Err(ActionError::InvariantViolated(
                "resource meter out of bounds".into(),
            ))
        }
    }
}

/// Looks up the acting combatant or fails with [`ActionError::ActorNotFound`].
pub(crate) fn actor_of(state: &CombatState, actor: CombatantId) -> Result<&Combatant, ActionError> {
    state
        .combatant(actor)
        .ok_or(ActionError::ActorNotFound(actor))
}
