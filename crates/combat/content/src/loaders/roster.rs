//! Roster loader: the allied party, the enemy group and their supplies.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{
    CombatStats, Combatant, CombatantId, ConsumablePool, Consumables, ItemId, Side, Skill,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Template for one combatant. Ids are assigned when the roster is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    pub health: u32,
    #[serde(default)]
    pub energy: u32,
    /// Starting health if the combatant enters the fight wounded.
    #[serde(default)]
    pub current_health: Option<u32>,
    #[serde(default)]
    pub stats: CombatStats,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl CombatantSpec {
    fn build(self, id: CombatantId, side: Side) -> Combatant {
        let combatant = Combatant::new(id, self.name, side, self.health, self.energy)
            .with_stats(self.stats)
            .with_skills(self.skills);

        match self.current_health {
            Some(current) => combatant.with_health(current),
            None => combatant,
        }
    }
}

/// Consumable stock per side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuppliesSpec {
    #[serde(default)]
    pub allies: BTreeMap<ItemId, u32>,
    #[serde(default)]
    pub enemies: BTreeMap<ItemId, u32>,
}

/// Roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    pub allies: Vec<CombatantSpec>,
    pub enemies: Vec<CombatantSpec>,
    #[serde(default)]
    pub supplies: SuppliesSpec,
}

/// Participants and supplies ready to start an encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    /// Allies first, then enemies; ids count up from 1 in that order.
    pub participants: Vec<Combatant>,
    pub consumables: Consumables,
}

impl From<RosterFile> for Roster {
    fn from(file: RosterFile) -> Self {
        let tagged = file
            .allies
            .into_iter()
            .map(|spec| (spec, Side::Ally))
            .chain(file.enemies.into_iter().map(|spec| (spec, Side::Enemy)));

        let participants = (1u32..)
            .zip(tagged)
            .map(|(id, (spec, side))| spec.build(CombatantId(id), side))
            .collect();

        let consumables = Consumables::new(
            file.supplies.allies.into_iter().collect::<ConsumablePool>(),
            file.supplies.enemies.into_iter().collect::<ConsumablePool>(),
        );

        Self {
            participants,
            consumables,
        }
    }
}

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let file: RosterFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        Ok(file.into())
    }
}
