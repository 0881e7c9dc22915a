//! Encounter construction errors.
//!
//! A session that fails any of these checks never starts.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::{CombatantId, Side};

/// Errors raised while building the initial combat state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitializationError {
    /// No participants at all.
    #[error("turn order is empty: no participants supplied")]
    EmptyTurnOrder,

    /// One side has no living members.
    #[error("degenerate encounter: {side} side has no living combatants")]
    DegenerateEncounter { side: Side },

    /// More participants than the engine supports.
    #[error("too many combatants (max: {max}, supplied: {supplied})")]
    TooManyCombatants { max: usize, supplied: usize },

    /// Two participants share an id.
    #[error("duplicate combatant id {0}")]
    DuplicateCombatant(CombatantId),

    /// A combatant carries more skills than the engine supports.
    #[error("combatant {combatant} has too many skills (max: {max}, supplied: {supplied})")]
    TooManySkills {
        combatant: CombatantId,
        max: usize,
        supplied: usize,
    },

    /// The turn order policy did not return a permutation of participants.
    #[error("turn order policy returned an invalid ordering")]
    InvalidTurnOrder,
}

impl CombatError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidTurnOrder => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTurnOrder => "INIT_EMPTY_TURN_ORDER",
            Self::DegenerateEncounter { .. } => "INIT_DEGENERATE_ENCOUNTER",
            Self::TooManyCombatants { .. } => "INIT_TOO_MANY_COMBATANTS",
            Self::DuplicateCombatant(_) => "INIT_DUPLICATE_COMBATANT",
            Self::TooManySkills { .. } => "INIT_TOO_MANY_SKILLS",
            Self::InvalidTurnOrder => "INIT_INVALID_TURN_ORDER",
        }
    }
}
