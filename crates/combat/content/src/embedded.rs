//! Default content compiled into the binary.
//!
//! Used when no content directory is configured.

pub const ITEMS_RON: &str = include_str!("../data/items.ron");
pub const ROSTER_RON: &str = include_str!("../data/roster.ron");
pub const COMBAT_TOML: &str = include_str!("../data/combat.toml");
