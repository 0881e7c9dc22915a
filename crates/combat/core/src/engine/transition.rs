//! Action transition dispatch and execution logic.

use crate::action::{
    ActionError, ActionKind, ActionResult, ActionTransition, AttackAction, CombatAction,
    FleeAction, UseItemAction, UseSkillAction,
};
use crate::env::CombatEnv;
use crate::state::CombatState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the combat state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut CombatState,
    env: &CombatEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<ActionError>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes a [`CombatAction`] to its transition.
pub(super) fn execute_transition(
    action: &CombatAction,
    state: &mut CombatState,
    env: &CombatEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    match &action.kind {
        ActionKind::Attack => {
            let transition = AttackAction::new(action.actor, action.target);
            drive_transition(&transition, state, env).map_err(ExecuteError::Attack)
        }
        ActionKind::Skill(skill) => {
            let transition = UseSkillAction::new(action.actor, skill.clone(), action.target);
            drive_transition(&transition, state, env).map_err(ExecuteError::Skill)
        }
        ActionKind::UseItem(item) => {
            let transition = UseItemAction::new(action.actor, item.clone(), action.target);
            drive_transition(&transition, state, env).map_err(ExecuteError::UseItem)
        }
        ActionKind::Flee => {
            let transition = FleeAction::new(action.actor);
            drive_transition(&transition, state, env).map_err(ExecuteError::Flee)
        }
    }
}
