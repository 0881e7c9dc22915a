//! High-level encounter orchestrator.
//!
//! The encounter owns the session handle, the provider registry and the event
//! bus, and exposes a builder-based API for clients to drive combat turn by
//! turn or to completion.

use std::sync::Arc;

use combat_core::{
    CombatConfig, CombatReport, CombatSession, CombatState, Combatant, CombatantId, Consumables,
    ItemOracle, LoggedEvent, Outcome, Resolution, SessionBuilder, Side, TurnOrderPolicy,
};
use tokio::sync::broadcast;

use crate::api::{ActionProvider, ProviderRegistry, Result, RuntimeError, SessionHandle};
use crate::events::{EventBus, Narrator, Topic};

/// Result of a single [`Encounter::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The current actor's action resolved.
    Acted(Resolution),

    /// The encounter had already ended; nothing was asked of any provider.
    Over(Outcome),
}

impl StepOutcome {
    /// Terminal outcome, if the encounter is over after this step.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            StepOutcome::Acted(resolution) => resolution.outcome,
            StepOutcome::Over(outcome) => Some(*outcome),
        }
    }
}

/// Drives a combat session with pluggable providers.
///
/// [`SessionHandle`] provides a cloneable façade for UI code that wants to
/// submit actions directly instead of through a provider.
pub struct Encounter {
    handle: SessionHandle,
    providers: ProviderRegistry,
    bus: EventBus,
    max_turns: Option<usize>,
    turns: usize,
    // Log position up to which events have been handed to the bus.
    published: u64,
}

impl Encounter {
    /// Create a new encounter builder
    pub fn builder(participants: Vec<Combatant>) -> EncounterBuilder {
        EncounterBuilder::new(participants)
    }

    /// Get a cloneable handle to the session
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> Option<broadcast::Receiver<LoggedEvent>> {
        self.bus.subscribe(topic)
    }

    /// Builds a narrator for this encounter's names.
    pub fn narrator(&self) -> Result<Narrator> {
        self.handle
            .read(|session| Narrator::new(session.state(), session.items()))
    }

    /// Number of actions resolved so far.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Set the default provider for a side
    pub fn set_provider(&mut self, side: Side, provider: impl ActionProvider + 'static) {
        self.providers.register_side(side, provider);
    }

    /// Asks the current actor's provider for a decision and resolves it.
    ///
    /// A rejected choice leaves the session untouched; the error is returned
    /// and the same actor is still up on the next call.
    pub fn step(&mut self) -> Result<StepOutcome> {
        self.flush_events()?;

        let (outcome, current) = self
            .handle
            .read(|session| (session.outcome(), session.current_actor()))?;
        if let Some(outcome) = outcome {
            return Ok(StepOutcome::Over(outcome));
        }
        let actor = current.ok_or(RuntimeError::NoCurrentActor)?;

        let side = self
            .handle
            .read(|session| session.state().combatant(actor).map(|c| c.side))?
            .ok_or(RuntimeError::NoCurrentActor)?;
        let provider = self.providers.provider_for(actor, side)?;
        let choice = self
            .handle
            .read(|session| provider.provide_action(actor, session))??;

        let resolution = match self.handle.submit(actor, choice.clone()) {
            Ok(resolution) => resolution,
            Err(error) => {
                tracing::warn!(
                    actor = %actor,
                    action = choice.kind.as_snake_case(),
                    target = ?choice.target,
                    %error,
                    "provider action rejected"
                );
                return Err(error);
            }
        };

        self.turns += 1;
        tracing::debug!(
            actor = %actor,
            action = choice.kind.as_snake_case(),
            target = ?choice.target,
            events = resolution.events.len(),
            "action resolved"
        );

        self.flush_events()?;

        if let Some(outcome) = resolution.outcome {
            tracing::info!(%outcome, turns = self.turns, "encounter ended");
        }

        Ok(StepOutcome::Acted(resolution))
    }

    /// Steps until the encounter ends and returns its report.
    ///
    /// Fails with [`RuntimeError::TurnLimit`] if a turn limit is configured
    /// and reached first; the session stays active in that case.
    pub fn run(&mut self) -> Result<CombatReport> {
        loop {
            if let Some(max_turns) = self.max_turns
                && self.turns >= max_turns
                && self.handle.is_active()?
            {
                tracing::warn!(max_turns, "turn limit reached");
                return Err(RuntimeError::TurnLimit { max_turns });
            }

            if self.step()?.outcome().is_some() {
                break;
            }
        }

        self.flush_events()?;
        self.handle.report()?.ok_or(RuntimeError::NoCurrentActor)
    }

    /// Ends the encounter from outside the turn loop.
    pub fn terminate(&mut self, outcome: Outcome) -> Result<()> {
        self.handle.terminate(outcome)?;
        tracing::info!(%outcome, turns = self.turns, "encounter terminated");
        self.flush_events()
    }

    pub fn report(&self) -> Result<Option<CombatReport>> {
        self.handle.report()
    }

    /// Publishes log entries the bus has not seen yet.
    fn flush_events(&mut self) -> Result<()> {
        let from = self.published;
        let pending = self
            .handle
            .read(|session| session.state().log.since(from).to_vec())?;

        if let Some(last) = pending.last() {
            self.published = last.sequence + 1;
        }
        self.bus.publish_all(&pending);
        Ok(())
    }
}

impl std::fmt::Debug for Encounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encounter")
            .field("handle", &self.handle)
            .field("providers", &self.providers)
            .field("max_turns", &self.max_turns)
            .field("turns", &self.turns)
            .finish()
    }
}

/// Builder for [`Encounter`] with flexible configuration.
pub struct EncounterBuilder {
    session: SessionBuilder,
    providers: ProviderRegistry,
    max_turns: Option<usize>,
    event_capacity: usize,
}

impl EncounterBuilder {
    fn new(participants: Vec<Combatant>) -> Self {
        Self {
            session: CombatSession::builder(participants),
            providers: ProviderRegistry::new(),
            max_turns: None,
            event_capacity: 256,
        }
    }

    pub fn consumables(mut self, consumables: Consumables) -> Self {
        self.session = self.session.consumables(consumables);
        self
    }

    /// Set the item catalog consulted for consumables
    pub fn items(mut self, items: Arc<dyn ItemOracle>) -> Self {
        self.session = self.session.items(items);
        self
    }

    pub fn config(mut self, config: CombatConfig) -> Self {
        self.session = self.session.config(config);
        self
    }

    pub fn turn_order(mut self, policy: impl TurnOrderPolicy + 'static) -> Self {
        self.session = self.session.turn_order(policy);
        self
    }

    /// Register the owner's termination callback
    pub fn on_terminate(mut self, callback: impl FnOnce(&CombatState, Outcome) + 'static) -> Self {
        self.session = self.session.on_terminate(callback);
        self
    }

    /// Set the default provider for a side
    pub fn provider(mut self, side: Side, provider: impl ActionProvider + 'static) -> Self {
        self.providers.register_side(side, provider);
        self
    }

    /// Bind a single combatant to its own provider
    pub fn combatant_provider(
        mut self,
        combatant: CombatantId,
        provider: impl ActionProvider + 'static,
    ) -> Self {
        self.providers.bind_combatant(combatant, provider);
        self
    }

    /// Stop [`Encounter::run`] after this many resolved actions
    pub fn max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    /// Buffered events per topic before slow subscribers start lagging
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Build the encounter
    pub fn build(self) -> Result<Encounter> {
        let session = self.session.build()?;

        tracing::info!(
            participants = session.state().participants.len(),
            first_actor = ?session.current_actor(),
            "encounter started"
        );

        Ok(Encounter {
            handle: SessionHandle::new(session),
            providers: self.providers,
            bus: EventBus::with_capacity(self.event_capacity),
            max_turns: self.max_turns,
            turns: 0,
            published: 0,
        })
    }
}
