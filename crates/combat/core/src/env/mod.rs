//! Read-only collaborators consulted during resolution.
//!
//! [`CombatEnv`] bundles the combat configuration with the item oracle so
//! transitions receive everything that is not part of the mutable state.
mod items;

pub use items::{ItemCatalog, ItemDefinition, ItemEffect, ItemOracle};

use crate::config::CombatConfig;

/// Environment passed alongside the state to every transition.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    config: &'a CombatConfig,
    items: &'a dyn ItemOracle,
}

impl<'a> CombatEnv<'a> {
    pub fn new(config: &'a CombatConfig, items: &'a dyn ItemOracle) -> Self {
        Self { config, items }
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }

    pub fn items(&self) -> &'a dyn ItemOracle {
        self.items
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
