//! Basic attack.

use crate::env::CombatEnv;
use crate::event::CombatEvent;
use crate::state::{CombatState, CombatantId};

use super::{ActionError, ActionKind, ActionResult, ActionTransition, actor_of, validate_target};

/// Strikes an opposing combatant with the actor's effective attack.
///
/// Damage is `effective_attack - effective_defense`, floored at the
/// configured minimum (at least 1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackAction {
    pub actor: CombatantId,
    pub target: Option<CombatantId>,
}

impl AttackAction {
    pub fn new(actor: CombatantId, target: Option<CombatantId>) -> Self {
        Self { actor, target }
    }

    /// Damage the attack would deal, without mutating anything.
    pub fn compute_damage(
        &self,
        state: &CombatState,
        env: &CombatEnv<'_>,
        target: CombatantId,
    ) -> Result<u32, ActionError> {
        let attacker = actor_of(state, self.actor)?;
        let defender = state
            .combatant(target)
            .ok_or(ActionError::TargetNotFound(target))?;

        let raw = attacker
            .effective_attack()
            .saturating_sub(defender.effective_defense());
        Ok(raw.max(env.config().minimum_damage()))
    }
}

impl ActionTransition for AttackAction {
    type Result = ActionResult;

    fn pre_validate(&self, state: &CombatState, env: &CombatEnv<'_>) -> Result<(), ActionError> {
        validate_target(state, env, self.actor, &ActionKind::Attack, self.target).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut CombatState,
        env: &CombatEnv<'_>,
    ) -> Result<ActionResult, ActionError> {
        let target = self.target.ok_or(ActionError::MissingTarget)?;
        let amount = self.compute_damage(state, env, target)?;

        let defender = state
            .combatant_mut(target)
            .ok_or(ActionError::TargetNotFound(target))?;
        let dealt = defender.health.deplete(amount);
        let remaining = defender.health.current();
        let defeated = !defender.is_alive();

        state.record(CombatEvent::AttackResolved {
            actor: self.actor,
            target,
            amount: dealt,
            remaining,
        });
        if defeated {
            state.record(CombatEvent::CombatantDefeated { combatant: target });
        }

        Ok(ActionResult::Attack {
            target,
            damage: dealt,
            defeated,
        })
    }
}
