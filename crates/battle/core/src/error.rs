//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (e.g. [`InvalidCombatant`](crate::state::InvalidCombatant),
//! [`HolosHackError`](crate::combat::HolosHackError)) live next to the code
//! that produces them. This module provides the severity classification they
//! all share.
//!
//! Only a combatant constructed with a broken invariant is fatal. Every other
//! failure mode inside a battle is either recoverable (the action is refused
//! and the battle continues) or a caller misuse of the runner.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// The requested action was refused; the battle continues unchanged.
    ///
    /// Examples: overcharge exhausted, hack gauge not full.
    Recoverable,

    /// The caller used the runner incorrectly.
    ///
    /// Examples: stepping a battle that already ended.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug in the engine.
    Internal,

    /// The battle cannot start.
    ///
    /// Examples: negative max health in a stat snapshot.
    Fatal,
}

impl ErrorSeverity {
    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or corrupt input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// - All error enums implement this trait
/// - `#[derive(thiserror::Error)]` provides Display/Error
/// - Severity reflects recoverability, not impact
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
