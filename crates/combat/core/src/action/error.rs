//! Action execution errors.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::{CombatantId, ItemId, SkillId};

/// Coarse classification surfaced to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorClass {
    /// Insufficient energy, cooldown remaining, no legal target, unknown id.
    InvalidAction,

    /// The actor is not the current actor or is already defeated.
    InvalidActorState,

    /// The session cannot take actions right now (busy or terminated).
    SessionUnavailable,

    /// Engine invariant violated.
    Internal,
}

impl ErrorClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidAction => "invalid_action",
            Self::InvalidActorState => "invalid_actor_state",
            Self::SessionUnavailable => "session_unavailable",
            Self::Internal => "internal",
        }
    }
}

/// Errors that can occur while validating or resolving an action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    // ========================================================================
    // Actor state
    // ========================================================================
    #[error("actor {0} not found")]
    ActorNotFound(CombatantId),

    #[error("actor {actor} cannot act out of turn (current actor: {current:?})")]
    NotCurrentActor {
        actor: CombatantId,
        current: Option<CombatantId>,
    },

    #[error("actor {0} is defeated")]
    ActorDefeated(CombatantId),

    // ========================================================================
    // Action validity
    // ========================================================================
    #[error("unknown skill '{0}'")]
    UnknownSkill(SkillId),

    #[error("unknown item '{0}'")]
    UnknownItem(ItemId),

    #[error("skill '{skill}' is on cooldown ({remaining} rounds left)")]
    OnCooldown { skill: SkillId, remaining: u32 },

    #[error("insufficient energy (required: {required}, available: {available})")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("no '{0}' left in the side's supplies")]
    ItemDepleted(ItemId),

    #[error("action requires a target")]
    MissingTarget,

    #[error("target {0} not found")]
    TargetNotFound(CombatantId),

    #[error("target {0} is not a legal target for this action")]
    IllegalTarget(CombatantId),

    // ========================================================================
    // Engine invariants
    // ========================================================================
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

impl ActionError {
    pub fn class(&self) -> ErrorClass {
        use ActionError::*;
        match self {
            ActorNotFound(_) | NotCurrentActor { .. } | ActorDefeated(_) => {
                ErrorClass::InvalidActorState
            }
            UnknownSkill(_)
            | UnknownItem(_)
            | OnCooldown { .. }
            | InsufficientEnergy { .. }
            | ItemDepleted(_)
            | MissingTarget
            | TargetNotFound(_)
            | IllegalTarget(_) => ErrorClass::InvalidAction,
            InvariantViolated(_) => ErrorClass::Internal,
        }
    }
}

impl CombatError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            ActorNotFound(_) | UnknownSkill(_) | UnknownItem(_) | TargetNotFound(_) => {
                ErrorSeverity::Validation
            }
            NotCurrentActor { .. } | ActorDefeated(_) => ErrorSeverity::Recoverable,
            OnCooldown { .. } | InsufficientEnergy { .. } | ItemDepleted(_) => {
                ErrorSeverity::Recoverable
            }
            MissingTarget | IllegalTarget(_) => ErrorSeverity::Recoverable,
            InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            NotCurrentActor { .. } => "ACTION_NOT_CURRENT_ACTOR",
            ActorDefeated(_) => "ACTION_ACTOR_DEFEATED",
            UnknownSkill(_) => "ACTION_UNKNOWN_SKILL",
            UnknownItem(_) => "ACTION_UNKNOWN_ITEM",
            OnCooldown { .. } => "ACTION_ON_COOLDOWN",
            InsufficientEnergy { .. } => "ACTION_INSUFFICIENT_ENERGY",
            ItemDepleted(_) => "ACTION_ITEM_DEPLETED",
            MissingTarget => "ACTION_MISSING_TARGET",
            TargetNotFound(_) => "ACTION_TARGET_NOT_FOUND",
            IllegalTarget(_) => "ACTION_ILLEGAL_TARGET",
            InvariantViolated(_) => "ACTION_INVARIANT_VIOLATED",
        }
    }
}
