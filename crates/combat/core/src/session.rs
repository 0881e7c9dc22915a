//! Encounter lifecycle.
//!
//! [`CombatSession`] owns the [`CombatState`] of one encounter. It validates
//! the roster, resolves actions one at a time through [`CombatEngine`],
//! advances the turn after every non-terminal action and hands the final
//! state to the encounter owner once an outcome is reached.
//!
//! `execute` takes `&mut self`, so a second request cannot start while one is
//! resolving. Callers that share a session across UI callbacks go through the
//! runtime's `SessionHandle`, which refuses overlapping requests as busy.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::action::{
    ActionError, ActionKind, ActionResult, CombatAction, ErrorClass, available_actions,
    legal_targets,
};
use crate::config::CombatConfig;
use crate::engine::{
    CombatEngine, ExecuteError, InsertionOrder, Outcome, TurnOrderPolicy, evaluate,
    is_permutation,
};
use crate::env::{CombatEnv, ItemCatalog, ItemOracle};
use crate::error::{CombatError, ErrorSeverity};
use crate::event::{CombatEvent, LoggedEvent};
use crate::state::{
    CombatState, Combatant, CombatantId, Consumables, InitializationError, Round, Side,
    TurnState,
};

/// Called once with the final state when the encounter ends.
pub type TerminationCallback = Box<dyn FnOnce(&CombatState, Outcome)>;

/// Where the session is in its action cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Ready for the current actor's action.
    AwaitingAction,

    /// The encounter is over.
    Terminated(Outcome),
}

/// Errors returned by session operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session already terminated: {0}")]
    Terminated(Outcome),

    #[error(transparent)]
    Rejected(#[from] ExecuteError),
}

impl SessionError {
    pub fn class(&self) -> ErrorClass {
        match self {
            SessionError::Terminated(_) => ErrorClass::SessionUnavailable,
            SessionError::Rejected(error) => error.class(),
        }
    }

    /// The underlying action error, if the engine rejected the request.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            SessionError::Rejected(error) => Some(error.action_error()),
            _ => None,
        }
    }
}

impl CombatError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::Terminated(_) => ErrorSeverity::Recoverable,
            SessionError::Rejected(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::Terminated(_) => "SESSION_TERMINATED",
            SessionError::Rejected(error) => error.error_code(),
        }
    }
}

/// Everything one successful request changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub result: ActionResult,

    /// Events appended by the action and the turn hand-over that followed.
    pub events: Vec<LoggedEvent>,

    /// Set when the action ended the encounter.
    pub outcome: Option<Outcome>,

    /// Whose turn it is now; `None` once terminated.
    pub next_actor: Option<CombatantId>,
}

/// Summary handed to the encounter owner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatReport {
    pub outcome: Outcome,
    pub rounds: Round,
    pub survivors: Vec<CombatantId>,
    pub fallen: Vec<CombatantId>,
    pub events: usize,
}

impl CombatReport {
    pub fn from_state(state: &CombatState, outcome: Outcome) -> Self {
        let (survivors, fallen): (Vec<_>, Vec<_>) =
            state.participants.iter().partition(|c| c.is_alive());

        Self {
            outcome,
            rounds: state.turn.round,
            survivors: survivors.into_iter().map(|c| c.id).collect(),
            fallen: fallen.into_iter().map(|c| c.id).collect(),
            events: state.log.len(),
        }
    }
}

/// Configures and validates a new encounter.
pub struct SessionBuilder {
    participants: Vec<Combatant>,
    consumables: Consumables,
    items: Arc<dyn ItemOracle>,
    config: CombatConfig,
    turn_order: Box<dyn TurnOrderPolicy>,
    on_terminate: Option<TerminationCallback>,
}

impl SessionBuilder {
    fn new(participants: Vec<Combatant>) -> Self {
        Self {
            participants,
            consumables: Consumables::default(),
            items: Arc::new(ItemCatalog::new()),
            config: CombatConfig::default(),
            turn_order: Box::new(InsertionOrder),
            on_terminate: None,
        }
    }

    pub fn consumables(mut self, consumables: Consumables) -> Self {
        self.consumables = consumables;
        self
    }

    pub fn items(mut self, items: Arc<dyn ItemOracle>) -> Self {
        self.items = items;
        self
    }

    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn turn_order(mut self, policy: impl TurnOrderPolicy + 'static) -> Self {
        self.turn_order = Box::new(policy);
        self
    }

    pub fn on_terminate(mut self, callback: impl FnOnce(&CombatState, Outcome) + 'static) -> Self {
        self.on_terminate = Some(Box::new(callback));
        self
    }

    /// Validates the roster, builds the turn order and opens round one.
    pub fn build(self) -> Result<CombatSession, InitializationError> {
        let participants = self.participants;

        if participants.is_empty() {
            return Err(InitializationError::EmptyTurnOrder);
        }
        if participants.len() > CombatConfig::MAX_COMBATANTS {
            return Err(InitializationError::TooManyCombatants {
                max: CombatConfig::MAX_COMBATANTS,
                supplied: participants.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for combatant in &participants {
            if !seen.insert(combatant.id) {
                return Err(InitializationError::DuplicateCombatant(combatant.id));
            }
            if combatant.skills.len() > CombatConfig::MAX_SKILLS {
                return Err(InitializationError::TooManySkills {
                    combatant: combatant.id,
                    max: CombatConfig::MAX_SKILLS,
                    supplied: combatant.skills.len(),
                });
            }
        }

        for side in [Side::Ally, Side::Enemy] {
            if !participants.iter().any(|c| c.side == side && c.is_alive()) {
                return Err(InitializationError::DegenerateEncounter { side });
            }
        }

        let order = self.turn_order.order(&participants);
        if !is_permutation(&order, participants.len()) {
            return Err(InitializationError::InvalidTurnOrder);
        }

        let (index, first) = order
            .iter()
            .enumerate()
            .find_map(|(index, &slot)| {
                let combatant = &participants[slot];
                combatant.is_alive().then_some((index, combatant))
            })
            .ok_or(InitializationError::EmptyTurnOrder)?;
        let (actor, side) = (first.id, first.side);

        let mut state = CombatState::new(
            participants,
            TurnState::new(order, index, side),
            self.consumables,
        );
        state.record(CombatEvent::RoundStarted {
            round: Round::FIRST,
        });
        state.record(CombatEvent::TurnStarted { actor, side });

        Ok(CombatSession {
            state,
            config: self.config,
            items: self.items,
            phase: SessionPhase::AwaitingAction,
            on_terminate: self.on_terminate,
        })
    }
}

/// A single running encounter.
pub struct CombatSession {
    state: CombatState,
    config: CombatConfig,
    items: Arc<dyn ItemOracle>,
    phase: SessionPhase,
    on_terminate: Option<TerminationCallback>,
}

impl CombatSession {
    pub fn builder(participants: Vec<Combatant>) -> SessionBuilder {
        SessionBuilder::new(participants)
    }

    /// Starts an encounter with default configuration and no consumables.
    pub fn initialize(participants: Vec<Combatant>) -> Result<Self, InitializationError> {
        Self::builder(participants).build()
    }

    /// Registers the owner's termination callback, replacing any earlier one.
    pub fn on_terminate(&mut self, callback: impl FnOnce(&CombatState, Outcome) + 'static) {
        self.on_terminate = Some(Box::new(callback));
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn items(&self) -> &dyn ItemOracle {
        self.items.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, SessionPhase::Terminated(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            SessionPhase::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Whose turn it is; `None` once the encounter is over.
    pub fn current_actor(&self) -> Option<CombatantId> {
        if self.is_active() {
            self.state.current_actor_id()
        } else {
            None
        }
    }

    pub fn legal_targets(
        &self,
        actor: CombatantId,
        kind: &ActionKind,
    ) -> Result<Vec<CombatantId>, ActionError> {
        legal_targets(&self.state, &self.env(), actor, kind)
    }

    pub fn available_actions(&self, actor: CombatantId) -> Vec<ActionKind> {
        if !self.is_active() {
            return Vec::new();
        }
        available_actions(&self.state, &self.env(), actor)
    }

    /// Resolves one action for the current actor.
    ///
    /// On success the turn has already passed to the next living combatant
    /// unless the action ended the encounter. On error nothing changed.
    pub fn execute(
        &mut self,
        actor: CombatantId,
        kind: ActionKind,
        target: Option<CombatantId>,
    ) -> Result<Resolution, SessionError> {
        self.ensure_ready()?;

        let first = self.state.log.next_sequence();
        let action = CombatAction::new(actor, kind, target);
        let env = CombatEnv::new(&self.config, self.items.as_ref());
        let mut engine = CombatEngine::new(&mut self.state);

        let executed = engine.execute(&env, &action)?;

        let mut outcome = executed.outcome;
        if outcome.is_none() {
            engine.advance(&env);
            outcome = evaluate(engine.state());
        }

        if let Some(outcome) = outcome {
            self.finish(outcome);
        }

        Ok(Resolution {
            result: executed.result,
            events: self.state.log.since(first).to_vec(),
            outcome,
            next_actor: self.current_actor(),
        })
    }

    /// Withdraws the current actor's side.
    pub fn flee(&mut self, actor: CombatantId) -> Result<Resolution, SessionError> {
        self.execute(actor, ActionKind::Flee, None)
    }

    /// Ends the encounter from outside the action flow.
    pub fn terminate(&mut self, outcome: Outcome) -> Result<(), SessionError> {
        self.ensure_ready()?;
        self.finish(outcome);
        Ok(())
    }

    /// Final summary, available once the encounter has ended.
    pub fn report(&self) -> Option<CombatReport> {
        self.outcome()
            .map(|outcome| CombatReport::from_state(&self.state, outcome))
    }

    pub fn into_state(self) -> CombatState {
        self.state
    }

    fn env(&self) -> CombatEnv<'_> {
        CombatEnv::new(&self.config, self.items.as_ref())
    }

    fn ensure_ready(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::AwaitingAction => Ok(()),
            SessionPhase::Terminated(outcome) => Err(SessionError::Terminated(outcome)),
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state.record(CombatEvent::CombatEnded { outcome });
        self.phase = SessionPhase::Terminated(outcome);
        if let Some(callback) = self.on_terminate.take() {
            callback(&self.state, outcome);
        }
    }
}

impl fmt::Debug for CombatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatSession")
            .field("phase", &self.phase)
            .field("round", &self.state.turn.round)
            .field("current_actor", &self.current_actor())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatStats, Skill, SkillId};

    fn ally(id: u32) -> Combatant {
        Combatant::new(CombatantId(id), format!("Ally {id}"), Side::Ally, 60, 20)
            .with_stats(CombatStats::new(10, 2))
    }

    fn enemy(id: u32) -> Combatant {
        Combatant::new(CombatantId(id), format!("Enemy {id}"), Side::Enemy, 40, 0)
            .with_stats(CombatStats::new(8, 1))
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert_eq!(
            CombatSession::initialize(Vec::new()).unwrap_err(),
            InitializationError::EmptyTurnOrder
        );
    }

    #[test]
    fn one_sided_roster_is_degenerate() {
        assert_eq!(
            CombatSession::initialize(vec![ally(1), ally(2)]).unwrap_err(),
            InitializationError::DegenerateEncounter { side: Side::Enemy }
        );
        assert_eq!(
            CombatSession::initialize(vec![ally(1).with_health(0), enemy(2)]).unwrap_err(),
            InitializationError::DegenerateEncounter { side: Side::Ally }
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        assert_eq!(
            CombatSession::initialize(vec![ally(1), enemy(1)]).unwrap_err(),
            InitializationError::DuplicateCombatant(CombatantId(1))
        );
    }

    #[test]
    fn oversized_skill_list_is_rejected() {
        let loaded = (0..=CombatConfig::MAX_SKILLS).fold(ally(1), |combatant, n| {
            let drill = SkillId::new(format!("drill_{n}"));
            combatant.with_skill(Skill::new(drill, "Drill").with_damage(1))
        });

        assert_eq!(
            CombatSession::initialize(vec![loaded, enemy(2)]).unwrap_err(),
            InitializationError::TooManySkills {
                combatant: CombatantId(1),
                max: CombatConfig::MAX_SKILLS,
                supplied: CombatConfig::MAX_SKILLS + 1,
            }
        );
    }

    #[test]
    fn invalid_policy_output_is_rejected() {
        let err = CombatSession::builder(vec![ally(1), enemy(2)])
            .turn_order(|_: &[Combatant]| vec![0, 0])
            .build()
            .unwrap_err();

        assert_eq!(err, InitializationError::InvalidTurnOrder);
    }

    #[test]
    fn allies_act_first_in_supplied_order() {
        let session = CombatSession::initialize(vec![enemy(3), ally(1), ally(2)]).unwrap();

        assert_eq!(session.state().turn.order, vec![1, 2, 0]);
        assert_eq!(session.current_actor(), Some(CombatantId(1)));
        assert_eq!(session.state().turn.round, Round::FIRST);
        assert_eq!(session.state().turn.acting_side, Side::Ally);
    }

    #[test]
    fn defeated_leader_is_skipped_at_start() {
        let session =
            CombatSession::initialize(vec![ally(1).with_health(0), ally(2), enemy(3)]).unwrap();

        assert_eq!(session.current_actor(), Some(CombatantId(2)));
        assert_eq!(session.state().turn.index, 1);
    }

    #[test]
    fn terminate_runs_callback_once_and_locks_session() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut session = CombatSession::builder(vec![ally(1), enemy(2)])
            .on_terminate(move |state, outcome| {
                sink.borrow_mut().push((outcome, state.log.len()));
            })
            .build()
            .unwrap();

        session.terminate(Outcome::Aborted).unwrap();

        assert_eq!(*seen.borrow(), vec![(Outcome::Aborted, 3)]);
        assert_eq!(session.outcome(), Some(Outcome::Aborted));
        assert_eq!(session.current_actor(), None);
        assert_eq!(
            session.terminate(Outcome::Victory),
            Err(SessionError::Terminated(Outcome::Aborted))
        );
        assert_eq!(
            session
                .execute(CombatantId(1), ActionKind::Attack, Some(CombatantId(2)))
                .unwrap_err()
                .class(),
            ErrorClass::SessionUnavailable
        );
    }

    #[test]
    fn late_callback_sees_the_final_state() {
        use std::cell::Cell;
        use std::rc::Rc;

        let ended = Rc::new(Cell::new(None));
        let sink = Rc::clone(&ended);
        let mut session = CombatSession::initialize(vec![ally(1), enemy(2)]).unwrap();
        session.on_terminate(move |_state, outcome| sink.set(Some(outcome)));

        session.flee(CombatantId(1)).unwrap();

        assert_eq!(ended.get(), Some(Outcome::Fled { side: Side::Ally }));
        let state = session.into_state();
        assert!(matches!(
            state.log.last().map(|e| &e.event),
            Some(CombatEvent::CombatEnded {
                outcome: Outcome::Fled { side: Side::Ally }
            })
        ));
    }

    #[test]
    fn rejected_request_keeps_session_awaiting() {
        let mut session = CombatSession::initialize(vec![ally(1), enemy(2)]).unwrap();

        let err = session
            .execute(CombatantId(1), ActionKind::Attack, Some(CombatantId(1)))
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::InvalidAction);
        assert_eq!(session.phase(), SessionPhase::AwaitingAction);
        assert!(
            session
                .execute(CombatantId(1), ActionKind::Attack, Some(CombatantId(2)))
                .is_ok()
        );
        assert_eq!(session.phase(), SessionPhase::AwaitingAction);
    }

    #[test]
    fn resolution_carries_new_events() {
        let mut session = CombatSession::initialize(vec![ally(1), enemy(2)]).unwrap();

        let resolution = session
            .execute(CombatantId(1), ActionKind::Attack, Some(CombatantId(2)))
            .unwrap();

        let tags: Vec<_> = resolution
            .events
            .iter()
            .map(|e| e.event.as_snake_case())
            .collect();
        assert_eq!(tags, vec!["attack_resolved", "turn_started"]);
        assert_eq!(resolution.next_actor, Some(CombatantId(2)));
        assert_eq!(resolution.outcome, None);
    }
}
