use std::collections::BTreeMap;

use crate::state::{ItemId, StatusEffectKind};

/// Instant effect of a consumable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Restores `amount` health to the target.
    InstantHeal { amount: u32 },

    /// Removes every debuff from the target.
    Cleanse,

    /// Attaches a timed status effect to the target.
    StatBuff {
        kind: StatusEffectKind,
        magnitude: u32,
        duration: u32,
    },
}

impl ItemEffect {
    /// Returns true for effects that help their target.
    pub fn is_restorative(&self) -> bool {
        match self {
            ItemEffect::InstantHeal { .. } | ItemEffect::Cleanse => true,
            ItemEffect::StatBuff { kind, .. } => !kind.is_debuff(),
        }
    }
}

/// Catalog entry for a consumable item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub effect: ItemEffect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

impl ItemDefinition {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, effect: ItemEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effect,
            energy_cost: 0,
            tags: Vec::new(),
        }
    }

    pub fn with_energy_cost(mut self, energy_cost: u32) -> Self {
        self.energy_cost = energy_cost;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Oracle providing item definitions by id.
///
/// Supplied by the inventory/economy collaborator; the engine only reads it.
pub trait ItemOracle {
    fn definition(&self, id: &ItemId) -> Option<&ItemDefinition>;

    /// Every definition, in a stable order.
    fn definitions(&self) -> Box<dyn Iterator<Item = &ItemDefinition> + '_>;
}

/// In-memory item catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, ItemDefinition>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, replacing any previous entry with the same id.
    pub fn insert(&mut self, definition: ItemDefinition) -> Option<ItemDefinition> {
        self.items.insert(definition.id.clone(), definition)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<ItemDefinition> for ItemCatalog {
    fn from_iter<I: IntoIterator<Item = ItemDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for definition in iter {
            catalog.insert(definition);
        }
        catalog
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    fn definitions(&self) -> Box<dyn Iterator<Item = &ItemDefinition> + '_> {
        Box::new(self.items.values())
    }
}
