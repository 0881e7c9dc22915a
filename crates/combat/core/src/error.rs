//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`ActionError`, `InitializationError`,
//! `ExecuteError`, `SessionError`) live next to the code that produces them.
//! They share the [`CombatError`] trait so callers can classify failures
//! uniformly without matching on every variant.
//!
//! Every error in this crate is local and recoverable at the process level:
//! a rejected action leaves the combat state untouched and is handed back to
//! the caller for correction.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller can pick another action (target, skill, item)
/// - **Validation**: malformed input at the boundary (unknown ids, bad rosters)
/// - **Internal**: invariant violation inside the engine; indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable, SCREAMING_SNAKE_CASE identifiers
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
