//! Provider registry for managing action providers.
//!
//! Each side has a default provider; individual combatants can be bound to
//! their own provider. Lookup falls back from the combatant binding to the
//! side default.

use std::collections::BTreeMap;

use combat_core::{CombatantId, Side};

use super::{ActionProvider, Result, RuntimeError};

/// Registry for managing action providers with combatant-specific bindings.
///
/// ```text
/// ProviderRegistry
/// ├── sides: BTreeMap<Side, Provider>               (side defaults)
/// └── combatants: BTreeMap<CombatantId, Provider>   (overrides)
/// ```
#[derive(Default)]
pub struct ProviderRegistry {
    sides: BTreeMap<Side, Box<dyn ActionProvider>>,
    combatants: BTreeMap<CombatantId, Box<dyn ActionProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default provider of a side, replacing any previous one.
    pub fn register_side(&mut self, side: Side, provider: impl ActionProvider + 'static) {
        self.sides.insert(side, Box::new(provider));
    }

    /// Binds a combatant to its own provider.
    pub fn bind_combatant(
        &mut self,
        combatant: CombatantId,
        provider: impl ActionProvider + 'static,
    ) {
        self.combatants.insert(combatant, Box::new(provider));
    }

    /// Resolves the provider for `actor` on `side`.
    pub fn provider_for(
        &mut self,
        actor: CombatantId,
        side: Side,
    ) -> Result<&mut (dyn ActionProvider + 'static)> {
        if let Some(provider) = self.combatants.get_mut(&actor) {
            return Ok(provider.as_mut());
        }

        self.sides
            .get_mut(&side)
            .map(|provider| provider.as_mut())
            .ok_or(RuntimeError::ProviderNotSet { side })
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("sides", &self.sides.keys().collect::<Vec<_>>())
            .field("combatants", &self.combatants.keys().collect::<Vec<_>>())
            .finish()
    }
}
