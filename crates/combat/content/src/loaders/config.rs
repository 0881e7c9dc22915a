//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`CombatConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::StackPolicy;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            minimum_damage = 3

            [targeting]
            healing_tags = ["mend"]
            "#,
        )
        .unwrap();

        assert_eq!(config.minimum_damage(), 3);
        assert!(config.targeting.is_healing_tag("mend"));
        assert!(!config.targeting.is_healing_tag("heal"));
        assert!(config.targeting.is_restorative_tag("medical"));
        assert_eq!(config.effects.default_stacking, StackPolicy::Refresh);
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let err = ConfigLoader::parse("minimum_damage = \"lots\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }
}
