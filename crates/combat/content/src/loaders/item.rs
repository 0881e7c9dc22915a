//! Item catalog loader.

use std::path::Path;

use combat_core::{ItemCatalog, ItemDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFile {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// Fails on duplicate item ids.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let file: ItemFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut catalog = ItemCatalog::new();
        for item in file.items {
            let id = item.id.clone();
            if catalog.insert(item).is_some() {
                anyhow::bail!("Duplicate item id '{}' in catalog", id);
            }
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ItemEffect, ItemId, ItemOracle, StatusEffectKind};

    #[test]
    fn parses_all_effect_kinds() {
        let catalog = ItemLoader::parse(
            r#"(
                items: [
                    (id: "stimpak", name: "Stimpak", effect: InstantHeal(amount: 25)),
                    (id: "antitoxin", name: "Antitoxin", effect: Cleanse, tags: ["medical"]),
                    (
                        id: "jet",
                        name: "Jet",
                        effect: StatBuff(kind: empowered, magnitude: 4, duration: 2),
                        energy_cost: 5,
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 3);
        let jet = catalog.definition(&ItemId::new("jet")).unwrap();
        assert_eq!(jet.energy_cost, 5);
        assert_eq!(
            jet.effect,
            ItemEffect::StatBuff {
                kind: StatusEffectKind::Empowered,
                magnitude: 4,
                duration: 2
            }
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ItemLoader::parse(
            r#"(items: [
                (id: "stimpak", name: "Stimpak", effect: Cleanse),
                (id: "stimpak", name: "Stimpak", effect: Cleanse),
            ])"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("Duplicate item id 'stimpak'"));
    }
}
