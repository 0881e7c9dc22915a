//! Content loaders for reading combat data from files.
//!
//! Each loader offers `load(path)` for files on disk and `parse(text)` for
//! in-memory sources such as the embedded defaults.

pub mod config;
pub mod factory;
pub mod item;
pub mod roster;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use roster::{CombatantSpec, Roster, RosterLoader, SuppliesSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
