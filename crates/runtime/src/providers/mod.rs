//! Action provider implementations for different combatant behaviors.

pub mod presets;

pub use presets::{BasicAttackProvider, FirstAvailableProvider, ScriptedProvider};
