//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the session, providers and encounter setup so clients
//! can bubble them up with consistent context.
use thiserror::Error;

use combat_core::{CombatantId, InitializationError, SessionError, Side};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Another request is still resolving on the same session.
    #[error("session is busy resolving another action")]
    Busy,

    #[error("{side} action provider not set")]
    ProviderNotSet { side: Side },

    #[error("action provider for {actor} failed: {reason}")]
    Provider { actor: CombatantId, reason: String },

    #[error("failed to initialize encounter")]
    Initialization(#[source] InitializationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("encounter is not awaiting an action")]
    NoCurrentActor,

    #[error("encounter still running after {max_turns} turns")]
    TurnLimit { max_turns: usize },
}

impl From<InitializationError> for RuntimeError {
    fn from(error: InitializationError) -> Self {
        RuntimeError::Initialization(error)
    }
}
