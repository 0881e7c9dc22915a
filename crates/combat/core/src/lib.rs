//! Deterministic turn-based combat rules for party encounters.
//!
//! `combat-core` defines the canonical combat rules (actions, targeting, status
//! effects, turn scheduling, outcomes) and exposes pure APIs shared by the
//! runtime and content tooling. All state mutation flows through
//! [`engine::CombatEngine`], and [`session::CombatSession`] owns one encounter
//! from initialization to termination.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod session;
pub mod state;

pub use action::{
    ActionError, ActionKind, ActionResult, ActionTransition, AttackAction, CombatAction,
    ErrorClass, FleeAction, TargetClass, UseItemAction, UseSkillAction, available_actions,
    legal_targets,
};
pub use config::{CombatConfig, EffectConfig, TargetingConfig};
pub use engine::{
    AdvanceOutcome, CombatEngine, ExecuteError, ExecutionOutcome, InitiativeOrder,
    InsertionOrder, Outcome, TransitionPhase, TransitionPhaseError, TurnOrderPolicy,
};
pub use env::{CombatEnv, ItemCatalog, ItemDefinition, ItemEffect, ItemOracle};
pub use error::{CombatError, ErrorSeverity};
pub use event::{CombatEvent, EventLog, HealthChange, LoggedEvent};
pub use session::{
    CombatReport, CombatSession, Resolution, SessionBuilder, SessionError, SessionPhase,
    TerminationCallback,
};
pub use state::{
    CombatState, CombatStats, Combatant, CombatantId, ConsumablePool, Consumables,
    EffectOrigin, EffectSource, EffectTemplate, InitializationError, ItemId, ResourceMeter,
    Round, Side, Skill, SkillId, StackPolicy, StatusEffect, StatusEffectKind, StatusEffects,
    TurnState,
};
