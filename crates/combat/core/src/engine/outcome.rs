use std::fmt;

use crate::state::{CombatState, Side};

/// Terminal result of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    /// Every enemy is down.
    Victory,

    /// Every ally is down. Also reported when both sides fall together.
    Defeat,

    /// `side` withdrew on its own turn.
    Fled { side: Side },

    /// Ended by the encounter owner.
    Aborted,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Victory => "victory",
            Outcome::Defeat => "defeat",
            Outcome::Fled { .. } => "fled",
            Outcome::Aborted => "aborted",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Fled { side } => write!(f, "fled ({side})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Checks the state for a wiped-out side.
///
/// Defeat takes precedence so a mutual wipe never reads as a win.
pub fn evaluate(state: &CombatState) -> Option<Outcome> {
    if !state.side_alive(Side::Ally) {
        Some(Outcome::Defeat)
    } else if !state.side_alive(Side::Enemy) {
        Some(Outcome::Victory)
    } else {
        None
    }
}
