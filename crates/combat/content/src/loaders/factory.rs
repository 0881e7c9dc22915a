//! Content factory for loading encounter content from a data directory.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, ItemCatalog};

use crate::embedded;
use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, Roster, RosterLoader};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── items.ron
/// └── roster.ron
/// ```
///
/// Without a directory the factory serves the embedded defaults.
#[derive(Debug, Clone, Default)]
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    /// Creates a factory reading from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Creates a factory serving the content compiled into the crate.
    pub fn embedded() -> Self {
        Self { data_dir: None }
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Load combat configuration from `combat.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        match &self.data_dir {
            Some(dir) => ConfigLoader::load(&dir.join("combat.toml")),
            None => ConfigLoader::parse(embedded::COMBAT_TOML),
        }
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        match &self.data_dir {
            Some(dir) => ItemLoader::load(&dir.join("items.ron")),
            None => ItemLoader::parse(embedded::ITEMS_RON),
        }
    }

    /// Load participants and supplies from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        match &self.data_dir {
            Some(dir) => RosterLoader::load(&dir.join("roster.ron")),
            None => RosterLoader::parse(embedded::ROSTER_RON),
        }
    }
}
