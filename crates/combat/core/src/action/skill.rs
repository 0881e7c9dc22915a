//! Skill use.

use crate::env::CombatEnv;
use crate::event::CombatEvent;
use crate::state::{CombatState, CombatantId, EffectSource, SkillId, StatusEffect};

use super::{
    ActionError, ActionKind, ActionResult, ActionTransition, TargetClass, actor_of, skill_class,
    validate_target,
};

/// Uses one of the actor's skills on a target.
///
/// Healing-class skills restore health on an ally; every other skill deals
/// its flat damage value to an enemy. Defense does not reduce skill damage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UseSkillAction {
    pub actor: CombatantId,
    pub skill: SkillId,
    pub target: Option<CombatantId>,
}

impl UseSkillAction {
    pub fn new(actor: CombatantId, skill: SkillId, target: Option<CombatantId>) -> Self {
        Self {
            actor,
            skill,
            target,
        }
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Skill(self.skill.clone())
    }
}

impl ActionTransition for UseSkillAction {
    type Result = ActionResult;

    fn pre_validate(&self, state: &CombatState, env: &CombatEnv<'_>) -> Result<(), ActionError> {
        let actor = actor_of(state, self.actor)?;
        let skill = actor
            .skill(&self.skill)
            .ok_or_else(|| ActionError::UnknownSkill(self.skill.clone()))?;

        if !skill.is_ready() {
            return Err(ActionError::OnCooldown {
                skill: self.skill.clone(),
                remaining: skill.current_cooldown,
            });
        }
        if !actor.energy.covers(skill.energy_cost) {
            return Err(ActionError::InsufficientEnergy {
                required: skill.energy_cost,
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

        let actor = state
            .combatant_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let skill = actor
            .skill_mut(&self.skill)
            .ok_or_else(|| ActionError::UnknownSkill(self.skill.clone()))?;
        skill.start_cooldown();
        let skill = skill.clone();
        let energy_spent = actor.energy.deplete(skill.energy_cost);

        let class = skill_class(&skill, &env.config().targeting);
        let recipient = state
            .combatant_mut(target)
            .ok_or(ActionError::TargetNotFound(target))?;

        let (damage, healing) = match class {
            TargetClass::Healing => (None, skill.healing.map(|h| recipient.health.restore(h))),
            _ => (skill.damage.map(|d| recipient.health.deplete(d)), None),
        };
        let defeated = !recipient.is_alive();

        let applied = match skill.effect {
            Some(template) if !defeated => {
                let policy = env.config().effects.policy_for(template.kind);
                recipient
                    .status_effects
                    .apply(
                        StatusEffect {
                            kind: template.kind,
                            remaining: template.duration,
                            magnitude: template.magnitude,
                            source: EffectSource::skill(self.actor, self.skill.clone()),
                        },
                        policy,
                    )
                    .cloned()
            }
            _ => None,
        };

        state.record(CombatEvent::SkillUsed {
            actor: self.actor,
            skill: self.skill.clone(),
            target,
            damage,
            healing,
            energy_spent,
        });
        if let Some(effect) = applied {
            state.record(CombatEvent::EffectApplied {
                target,
                kind: effect.kind,
                magnitude: effect.magnitude,
                remaining: effect.remaining,
                source: effect.source,
            });
        }
        if defeated {
            state.record(CombatEvent::CombatantDefeated { combatant: target });
        }

        Ok(ActionResult::Skill {
            skill: self.skill.clone(),
            target,
            damage,
            healing,
            defeated,
        })
    }
}
