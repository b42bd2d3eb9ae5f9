//! Oracle availability errors.

use crate::error::{BattleErrorKind, CoreError};

/// Raised when the engine needs an oracle the caller did not provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("spell catalog not available")]
    SpellsNotAvailable,

    #[error("skill catalog not available")]
    SkillsNotAvailable,
}

impl CoreError for OracleError {
    fn kind(&self) -> BattleErrorKind {
        // Without a catalog no id can resolve; the caller sees the same
        // shape as an unknown id.
        BattleErrorKind::NotFound
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::SpellsNotAvailable => "ORACLE_SPELLS_NOT_AVAILABLE",
            OracleError::SkillsNotAvailable => "ORACLE_SKILLS_NOT_AVAILABLE",
        }
    }
}
