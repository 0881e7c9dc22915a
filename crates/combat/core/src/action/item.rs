//! Consumable item use.

use crate::env::{CombatEnv, ItemEffect};
use crate::event::CombatEvent;
use crate::state::{CombatState, CombatantId, EffectSource, ItemId, StatusEffect};

use super::{ActionError, ActionKind, ActionResult, ActionTransition, actor_of, validate_target};

/// Consumes one unit from the acting side's pool and applies its effect.
///
/// Items have no cooldown; they cost the actor's turn and the definition's
/// energy cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UseItemAction {
    pub actor: CombatantId,
    pub item: ItemId,
    pub target: Option<CombatantId>,
}

impl UseItemAction {
    pub fn new(actor: CombatantId, item: ItemId, target: Option<CombatantId>) -> Self {
        Self {
            actor,
            item,
            target,
        }
    }

    fn kind(&self) -> ActionKind {
        ActionKind::UseItem(self.item.clone())
    }
}

impl ActionTransition for UseItemAction {
    type Result = ActionResult;

    fn pre_validate(&self, state: &CombatState, env: &CombatEnv<'_>) -> Result<(), ActionError> {
        let actor = actor_of(state, self.actor)?;
        let definition = env
            .items()
            .definition(&self.item)
            .ok_or_else(|| ActionError::UnknownItem(self.item.clone()))?;

        if state.consumables.side(actor.side).count(&self.item) == 0 {
            return Err(ActionError::ItemDepleted(self.item.clone()));
        }
        if !actor.energy.covers(definition.energy_cost) {
            return Err(ActionError::InsufficientEnergy {
                required: definition.energy_cost,
                available: actor.energy.current(),
            });
        }

        validate_target(state, env, self.actor, &self.kind(), self.target).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut CombatState,
        env: &CombatEnv<'_>,
    ) -> Result<ActionResult, ActionError> {
        let target = self.target.ok_or(ActionError::MissingTarget)?;
        let definition = env
            .items()
            .definition(&self.item)
            .ok_or_else(|| ActionError::UnknownItem(self.item.clone()))?;

        let actor = state
            .combatant_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let side = actor.side;
        let energy_spent = actor.energy.deplete(definition.energy_cost);

        if !state.consumables.side_mut(side).take(&self.item) {
            return Err(ActionError::ItemDepleted(self.item.clone()));
        }

        let recipient = state
            .combatant_mut(target)
            .ok_or(ActionError::TargetNotFound(target))?;

        let mut healing = None;
        let mut follow_up = None;
        match definition.effect {
            ItemEffect::InstantHeal { amount } => {
                healing = Some(recipient.health.restore(amount));
            }
            ItemEffect::Cleanse => {
                let removed = recipient.status_effects.cleanse();
                follow_up = Some(CombatEvent::EffectsCleansed { target, removed });
            }
            ItemEffect::StatBuff {
                kind,
                magnitude,
                duration,
            } => {
                let policy = env.config().effects.policy_for(kind);
                let effect = StatusEffect {
                    kind,
                    remaining: duration,
                    magnitude,
                    source: EffectSource::item(self.actor, self.item.clone()),
                };
                follow_up = recipient
                    .status_effects
                    .apply(effect, policy)
                    .map(|applied| CombatEvent::EffectApplied {
                        target,
                        kind: applied.kind,
                        magnitude: applied.magnitude,
                        remaining: applied.remaining,
                        source: applied.source.clone(),
                    });
            }
        }

        state.record(CombatEvent::ItemUsed {
            actor: self.actor,
            item: self.item.clone(),
            target,
            healing,
            energy_spent,
        });
        if let Some(event) = follow_up {
            state.record(event);
        }

        Ok(ActionResult::UseItem {
            item: self.item.clone(),
            target,
            healing,
        })
    }
}
