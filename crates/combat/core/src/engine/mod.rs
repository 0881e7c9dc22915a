//! Turn scheduling and action execution pipeline.
//!
//! The [`CombatEngine`] is the authoritative reducer for [`CombatState`]. It
//! validates the actor, drives the action's transition phases and evaluates
//! the outcome. Execution fails closed: if any phase rejects the action, the
//! state is restored to exactly what it was before the call.

mod errors;
mod order;
mod outcome;
mod transition;
mod turns;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use order::{InitiativeOrder, InsertionOrder, TurnOrderPolicy};
pub use outcome::{Outcome, evaluate};
pub use turns::AdvanceOutcome;

pub(crate) use order::is_permutation;

use crate::action::{ActionError, ActionResult, CombatAction};
use crate::env::CombatEnv;
use crate::state::{CombatState, CombatantId};

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Action-specific result (damage dealt, healing done, side that fled).
    pub result: ActionResult,

    /// Terminal outcome reached by this action, if any.
    pub outcome: Option<Outcome>,
}

/// Combat engine that validates and resolves actions against a state.
///
/// All mutations flow through `pre_validate → apply → post_validate`; turn
/// hand-over happens separately through [`CombatEngine::advance`].
pub struct CombatEngine<'a> {
    state: &'a mut CombatState,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut CombatState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &CombatState {
        self.state
    }

    pub fn current_actor(&self) -> Option<CombatantId> {
        self.state.current_actor_id()
    }

    /// Executes an action on behalf of the current actor.
    ///
    /// Does not advance the turn. A returned outcome means the encounter is
    /// over and the caller must not advance.
    pub fn execute(
        &mut self,
        env: &CombatEnv<'_>,
        action: &CombatAction,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.validate_actor(action)?;

        let before = self.state.clone();

        let result = match transition::execute_transition(action, self.state, env) {
            Ok(result) => result,
            Err(error) => {
                *self.state = before;
                return Err(error);
            }
        };

        let outcome = match &result {
            ActionResult::Fled { side } => Some(Outcome::Fled { side: *side }),
            _ => evaluate(self.state),
        };

        Ok(ExecutionOutcome { result, outcome })
    }

    /// Validates that the action's actor holds the turn and is still standing.
    fn validate_actor(&self, action: &CombatAction) -> Result<(), ExecuteError> {
        let current = self.state.current_actor_id();
        if current != Some(action.actor) {
            return Err(ExecuteError::InvalidActor(ActionError::NotCurrentActor {
                actor: action.actor,
                current,
            }));
        }

        match self.state.combatant(action.actor) {
            None => Err(ExecuteError::InvalidActor(ActionError::ActorNotFound(
                action.actor,
            ))),
            Some(actor) if !actor.is_alive() => Err(ExecuteError::InvalidActor(
                ActionError::ActorDefeated(action.actor),
            )),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;
    use crate::config::CombatConfig;
    use crate::env::ItemCatalog;
    use crate::event::CombatEvent;
    use crate::state::{
        CombatStats, Combatant, Consumables, EffectSource, Round, Side, Skill, SkillId,
        StackPolicy, StatusEffect, StatusEffectKind, TurnState,
    };

    fn skirmish() -> CombatState {
        let ranger = Combatant::new(CombatantId(1), "Ranger", Side::Ally, 100, 50)
            .with_stats(CombatStats::new(14, 2))
            .with_skill(
                Skill::new("snipe", "Snipe")
                    .with_energy_cost(10)
                    .with_damage(20)
                    .with_cooldown(2),
            );
        let medic = Combatant::new(CombatantId(2), "Medic", Side::Ally, 70, 40)
            .with_stats(CombatStats::new(6, 1));
        let raider = Combatant::new(CombatantId(3), "Raider", Side::Enemy, 80, 10)
            .with_stats(CombatStats::new(10, 4));
        let hound = Combatant::new(CombatantId(4), "Hound", Side::Enemy, 40, 0)
            .with_stats(CombatStats::new(8, 0));

        CombatState::new(
            vec![ranger, medic, raider, hound],
            TurnState::new(vec![0, 1, 2, 3], 0, Side::Ally),
            Consumables::default(),
        )
    }

    #[test]
    fn rejects_out_of_turn_actor() {
        let mut state = skirmish();
        let config = CombatConfig::default();
        let items = ItemCatalog::new();
        let env = CombatEnv::new(&config, &items);
        let mut engine = CombatEngine::new(&mut state);

        let err = engine
            .execute(&env, &CombatAction::attack(CombatantId(3), CombatantId(1)))
            .unwrap_err();

        assert_eq!(
            err,
            ExecuteError::InvalidActor(ActionError::NotCurrentActor {
                actor: CombatantId(3),
                current: Some(CombatantId(1)),
            })
        );
        assert_eq!(err.class(), crate::action::ErrorClass::InvalidActorState);
    }

    #[test]
    fn failed_transition_restores_state() {
        let mut state = skirmish();
        let before = state.clone();
        let config = CombatConfig::default();
        let items = ItemCatalog::new();
        let env = CombatEnv::new(&config, &items);
        let mut engine = CombatEngine::new(&mut state);

        let err = engine
            .execute(&env, &CombatAction::skill(CombatantId(1), "snipe", CombatantId(2)))
            .unwrap_err();

        assert_eq!(err.phase(), Some(TransitionPhase::PreValidate));
        assert_eq!(state, before);
    }

    #[test]
    fn advance_skips_defeated_and_wraps_round() {
        let mut state = skirmish();
        state.participants[3].health.deplete(40);
        let config = CombatConfig::default();
        let items = ItemCatalog::new();
        let env = CombatEnv::new(&config, &items);
        let mut engine = CombatEngine::new(&mut state);

        assert_eq!(
            engine.advance(&env),
            AdvanceOutcome::Advanced {
                actor: CombatantId(2),
                round_wrapped: false
            }
        );
        assert_eq!(
            engine.advance(&env),
            AdvanceOutcome::Advanced {
                actor: CombatantId(3),
                round_wrapped: false
            }
        );
        assert_eq!(
            engine.advance(&env),
            AdvanceOutcome::Advanced {
                actor: CombatantId(1),
                round_wrapped: true
            }
        );
        assert_eq!(state.turn.round, Round(2));
        assert_eq!(state.turn.acting_side, Side::Ally);
    }

    #[test]
    fn round_wrap_ticks_cooldowns_and_effects() {
        let mut state = skirmish();
        state.participants[0].skills[0].current_cooldown = 2;
        state.participants[2].status_effects.apply(
            StatusEffect {
                kind: StatusEffectKind::Poisoned,
                remaining: 1,
                magnitude: 5,
                source: EffectSource::skill(CombatantId(1), SkillId::new("toxin_dart")),
            },
            StackPolicy::Stack,
        );
        state.turn.index = 3;
        let config = CombatConfig::default();
        let items = ItemCatalog::new();
        let env = CombatEnv::new(&config, &items);

        CombatEngine::new(&mut state).advance(&env);

        assert_eq!(state.participants[0].skills[0].current_cooldown, 1);
        let raider = &state.participants[2];
        assert_eq!(raider.health.current(), 75);
        assert!(raider.status_effects.is_empty());

        let tags: Vec<_> = state.log.iter().map(|e| e.event.as_snake_case()).collect();
        assert_eq!(
            tags,
            vec!["round_started", "effect_ticked", "effect_expired", "turn_started"]
        );
    }

    #[test]
    fn advance_stalls_when_a_side_is_wiped() {
        let mut state = skirmish();
        state.participants[2].health.deplete(80);
        state.participants[3].health.deplete(40);
        let snapshot = state.clone();
        let config = CombatConfig::default();
        let items = ItemCatalog::new();
        let env = CombatEnv::new(&config, &items);

        assert_eq!(
            CombatEngine::new(&mut state).advance(&env),
            AdvanceOutcome::Stalled
        );
        assert_eq!(state, snapshot);
    }

    #[test]
    fn flee_reports_outcome_for_acting_side() {
        let mut state = skirmish();
        let config = CombatConfig::default();
        let items = ItemCatalog::new();
        let env = CombatEnv::new(&config, &items);

        let executed = CombatEngine::new(&mut state)
            .execute(
                &env,
                &CombatAction::new(CombatantId(1), ActionKind::Flee, None),
            )
            .unwrap();

        assert_eq!(executed.outcome, Some(Outcome::Fled { side: Side::Ally }));
        assert!(matches!(
            state.log.last().map(|e| &e.event),
            Some(CombatEvent::Fled { side: Side::Ally, .. })
        ));
    }
}
