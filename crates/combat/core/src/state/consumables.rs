//! Shared consumable pools, one per side.

use std::collections::BTreeMap;
use std::fmt;

use crate::state::Side;

/// Catalog identifier of a consumable item (e.g. `"stimpak"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Item stock shared by every member of one side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConsumablePool {
    stock: BTreeMap<ItemId, u32>,
}

impl ConsumablePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, item: impl Into<ItemId>, count: u32) -> Self {
        self.add(item.into(), count);
        self
    }

    pub fn add(&mut self, item: ItemId, count: u32) {
        if count == 0 {
            return;
        }
        let entry = self.stock.entry(item).or_default();
        *entry = entry.saturating_add(count);
    }

    pub fn count(&self, item: &ItemId) -> u32 {
        self.stock.get(item).copied().unwrap_or(0)
    }

    /// Removes one unit. Returns false if none is left.
    pub fn take(&mut self, item: &ItemId) -> bool {
        match self.stock.get_mut(item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.stock.remove(item);
                }
                true
            }
            _ => false,
        }
    }

    /// Items with at least one unit, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, u32)> {
        self.stock
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(id, count)| (id, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}

impl FromIterator<(ItemId, u32)> for ConsumablePool {
    fn from_iter<I: IntoIterator<Item = (ItemId, u32)>>(iter: I) -> Self {
        let mut pool = Self::new();
        for (item, count) in iter {
            pool.add(item, count);
        }
        pool
    }
}

/// Consumable pools of both sides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Consumables {
    pub allies: ConsumablePool,
    pub enemies: ConsumablePool,
}

impl Consumables {
    pub fn new(allies: ConsumablePool, enemies: ConsumablePool) -> Self {
        Self { allies, enemies }
    }

    pub fn side(&self, side: Side) -> &ConsumablePool {
        match side {
            Side::Ally => &self.allies,
            Side::Enemy => &self.enemies,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut ConsumablePool {
        match side {
            Side::Ally => &mut self.allies,
            Side::Enemy => &mut self.enemies,
        }
    }
}
