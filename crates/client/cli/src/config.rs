//! CLI configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

/// Output format for resolved events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Narration,
    Json,
}

#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Directory holding `combat.toml`, `items.ron` and `roster.ron`.
    /// Embedded content is used when unset.
    pub content_dir: Option<PathBuf>,
    pub max_turns: usize,
    pub initiative: bool,
    pub output: OutputFormat,
    pub log_file: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            max_turns: 500,
            initiative: false,
            output: OutputFormat::default(),
            log_file: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_CONTENT_DIR` - Content directory (default: embedded content)
    /// - `COMBAT_MAX_TURNS` - Actions before the encounter is aborted (default: 500)
    /// - `COMBAT_TURN_ORDER` - `insertion` or `initiative` (default: insertion)
    /// - `COMBAT_OUTPUT` - `narration` or `json` (default: narration)
    /// - `COMBAT_LOG_FILE` - Also write logs to this file
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.content_dir = env::var_os("COMBAT_CONTENT_DIR").map(PathBuf::from);

        if let Some(max_turns) = read_env::<usize>("COMBAT_MAX_TURNS") {
            config.max_turns = max_turns.max(1);
        }

        if let Ok(order) = env::var("COMBAT_TURN_ORDER") {
            config.initiative = order.eq_ignore_ascii_case("initiative");
        }

        if let Ok(output) = env::var("COMBAT_OUTPUT")
            && output.eq_ignore_ascii_case("json")
        {
            config.output = OutputFormat::Json;
        }

        config.log_file = env::var_os("COMBAT_LOG_FILE").map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
