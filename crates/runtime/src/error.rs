//! Runtime-level errors.
//!
//! The façade folds every engine rejection into one error type and exposes
//! the shared classification so transport layers can shape responses without
//! matching on variants.

use battle_core::{
    BattleErrorKind, CoreError, ExecuteError, RollbackError, SetupError, TurnError,
};

use crate::session::BattleId;

/// Errors surfaced by the battle session façade.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("battle {0} not found")]
    BattleNotFound(BattleId),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Rollback(#[from] RollbackError),
}

impl RuntimeError {
    /// Rejection classification, for response shaping.
    pub fn kind(&self) -> BattleErrorKind {
        match self {
            RuntimeError::BattleNotFound(_) => BattleErrorKind::NotFound,
            RuntimeError::Setup(_) => BattleErrorKind::Validation,
            RuntimeError::Execute(e) => e.kind(),
            RuntimeError::Turn(e) => e.kind(),
            RuntimeError::Rollback(e) => e.kind(),
        }
    }

    /// Stable machine-readable code, for response payloads and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::BattleNotFound(_) => "BATTLE_NOT_FOUND",
            RuntimeError::Setup(_) => "BATTLE_SETUP_INVALID",
            RuntimeError::Execute(e) => e.error_code(),
            RuntimeError::Turn(e) => e.error_code(),
            RuntimeError::Rollback(e) => e.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
