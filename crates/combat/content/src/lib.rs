//! Data-driven combat content and loaders.
//!
//! This crate houses the shipped encounter content and provides loaders for
//! RON/TOML data files:
//! - Item catalogs (RON), consulted by the engine as an item oracle
//! - Rosters: allied party, enemy group and their shared supplies (RON)
//! - Combat configuration: damage floor, targeting tags, effect stacking (TOML)
//!
//! Content is consumed when an encounter is built and never appears in
//! combat state beyond the combatants it produces.

pub mod embedded;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CombatantSpec, ConfigLoader, ContentFactory, ItemLoader, Roster, RosterLoader, SuppliesSpec,
};
