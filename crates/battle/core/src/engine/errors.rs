//! Error types for the action execution pipeline.

use crate::action::{AttackError, SkillError, SpellError};
use crate::error::{BattleErrorKind, CoreError};
use crate::state::BattlePhase;

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

/// Errors surfaced while executing an action through the battle engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("battle is not active (phase {phase:?})")]
    BattleNotActive { phase: BattlePhase },

    #[error("attack action failed: {0}")]
    Attack(TransitionPhaseError<AttackError>),

    #[error("spell action failed: {0}")]
    Spell(TransitionPhaseError<SpellError>),

    #[error("skill action failed: {0}")]
    Skill(TransitionPhaseError<SkillError>),
}

impl CoreError for ExecuteError {
    fn kind(&self) -> BattleErrorKind {
        match self {
            ExecuteError::BattleNotActive { .. } => BattleErrorKind::InvalidState,
            ExecuteError::Attack(e) => e.error.kind(),
            ExecuteError::Spell(e) => e.error.kind(),
            ExecuteError::Skill(e) => e.error.kind(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::BattleNotActive { .. } => "BATTLE_NOT_ACTIVE",
            ExecuteError::Attack(e) => e.error.error_code(),
            ExecuteError::Spell(e) => e.error.error_code(),
            ExecuteError::Skill(e) => e.error.error_code(),
        }
    }
}

/// Errors that can occur during turn operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("battle is not active (phase {phase:?})")]
    BattleNotActive { phase: BattlePhase },

    #[error("no participant is able to act")]
    NoActiveParticipants,
}

impl CoreError for TurnError {
    fn kind(&self) -> BattleErrorKind {
        BattleErrorKind::InvalidState
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::BattleNotActive { .. } => "BATTLE_NOT_ACTIVE",
            TurnError::NoActiveParticipants => "TURN_NO_ACTIVE_PARTICIPANTS",
        }
    }
}

/// Errors that can occur during rollback.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollbackError {
    #[error("battle is not active (phase {phase:?})")]
    BattleNotActive { phase: BattlePhase },

    #[error("action index {requested} does not exist (log holds {len} entries)")]
    IndexOutOfRange { requested: usize, len: usize },
}

impl CoreError for RollbackError {
    fn kind(&self) -> BattleErrorKind {
        match self {
            RollbackError::BattleNotActive { .. } => BattleErrorKind::InvalidState,
            RollbackError::IndexOutOfRange { .. } => BattleErrorKind::StateConflict,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RollbackError::BattleNotActive { .. } => "BATTLE_NOT_ACTIVE",
            RollbackError::IndexOutOfRange { .. } => "ROLLBACK_INDEX_OUT_OF_RANGE",
        }
    }
}
