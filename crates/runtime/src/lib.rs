//! Runtime orchestration for turn-based party combat.
//!
//! This crate wires action providers, the session input adapter and event
//! routing around a [`combat_core::CombatSession`]. Consumers embed
//! [`Encounter`] to drive turns, subscribe to events, and submit actions
//! through [`SessionHandle`].
//!
//! Modules are organized by responsibility:
//! - [`encounter`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event routing and narration
//! - [`providers`] ships ready-made decision functions
pub mod api;
pub mod encounter;
pub mod events;
pub mod providers;

pub use api::{
    ActionChoice, ActionProvider, ProviderRegistry, Result, RuntimeError, SessionHandle,
};
pub use encounter::{Encounter, EncounterBuilder, StepOutcome};
pub use events::{EventBus, Narrator, Topic};
pub use providers::{BasicAttackProvider, FirstAvailableProvider, ScriptedProvider};
