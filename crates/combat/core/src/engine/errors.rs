//! Error types for the action execution pipeline.

use crate::action::{ActionError, ErrorClass};
use crate::error::{CombatError, ErrorSeverity};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the combat engine.
///
/// Every variant leaves the state exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("invalid actor: {0}")]
    InvalidActor(ActionError),

    #[error("attack action failed: {0}")]
    Attack(TransitionPhaseError<ActionError>),

    #[error("skill action failed: {0}")]
    Skill(TransitionPhaseError<ActionError>),

    #[error("use item action failed: {0}")]
    UseItem(TransitionPhaseError<ActionError>),

    #[error("flee action failed: {0}")]
    Flee(TransitionPhaseError<ActionError>),
}

impl ExecuteError {
    /// The action error behind this failure.
    pub fn action_error(&self) -> &ActionError {
        match self {
            ExecuteError::InvalidActor(error) => error,
            ExecuteError::Attack(e)
            | ExecuteError::Skill(e)
            | ExecuteError::UseItem(e)
            | ExecuteError::Flee(e) => &e.error,
        }
    }

    /// Pipeline phase that failed, if the transition was entered at all.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            ExecuteError::InvalidActor(_) => None,
            ExecuteError::Attack(e)
            | ExecuteError::Skill(e)
            | ExecuteError::UseItem(e)
            | ExecuteError::Flee(e) => Some(e.phase),
        }
    }

    pub fn class(&self) -> ErrorClass {
        self.action_error().class()
    }
}

impl CombatError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self.phase() {
            Some(TransitionPhase::Apply | TransitionPhase::PostValidate) => {
                ErrorSeverity::Internal
            }
            _ => self.action_error().severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        self.action_error().error_code()
    }
}
