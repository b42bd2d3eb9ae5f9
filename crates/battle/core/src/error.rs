//! Common error infrastructure for battle-core.
//!
//! This module provides shared types and traits used across all error types in
//! battle-core. Domain-specific errors (e.g. `AttackError`, `SpellError`) are
//! defined in their respective modules alongside the actions they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each action has its own error type with specific variants
//! - **Uniform Classification**: Every rejection maps to one of four kinds the
//!   request layer can act on without inspecting variants
//! - **Stable Codes**: `error_code()` strings are part of the external contract

/// Classification of a rejection, used by the request layer to shape responses.
///
/// Every error in the crate maps to exactly one kind:
/// - **NotFound**: an id (participant, spell, attack profile, skill) does not
///   resolve within the battle or catalog
/// - **InvalidState**: the battle or participant is in a state that forbids
///   the request (inactive battle, downed actor, spent action slot, empty
///   spell slot)
/// - **Validation**: malformed input (roll out of range, dice mismatch,
///   empty target list)
/// - **StateConflict**: the request references history that no longer exists
///   (rollback past the truncation point)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleErrorKind {
    NotFound,
    InvalidState,
    Validation,
    StateConflict,
}

impl BattleErrorKind {
    /// Returns a human-readable description of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidState => "invalid_state",
            Self::Validation => "validation",
            Self::StateConflict => "state_conflict",
        }
    }

    /// Returns true if retrying the identical request could ever succeed.
    ///
    /// InvalidState rejections may clear as the battle progresses (a spent
    /// action slot resets on the next turn); the other kinds never do.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::InvalidState)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify by what the caller should do, not by where the check lives
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the rejection classification of this error.
    fn kind(&self) -> BattleErrorKind;

    /// Returns a stable machine-readable error code.
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_are_stable() {
        assert_eq!(BattleErrorKind::NotFound.as_str(), "not_found");
        assert_eq!(BattleErrorKind::StateConflict.as_str(), "state_conflict");
    }

    #[test]
    fn only_invalid_state_is_retryable() {
        assert!(BattleErrorKind::InvalidState.is_retryable());
        assert!(!BattleErrorKind::Validation.is_retryable());
        assert!(!BattleErrorKind::NotFound.is_retryable());
        assert!(!BattleErrorKind::StateConflict.is_retryable());
    }
}
