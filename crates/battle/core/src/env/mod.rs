//! Traits describing read-only catalog data.
//!
//! Oracles expose spell definitions and skill unlock state. The [`Env`]
//! aggregate bundles them so the engine can access everything it needs
//! without hard coupling to concrete implementations.

mod error;
mod skills;
mod spells;

pub use error::OracleError;
pub use skills::SkillOracle;
pub use spells::{
    Ability, HitCheckDef, SavingThrowDef, SpellDefinition, SpellKind, SpellOracle, SpellScope,
    SpellTargeting,
};

/// Aggregates read-only oracles required by the action pipeline.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, S, K>
where
    S: SpellOracle + ?Sized,
    K: SkillOracle + ?Sized,
{
    spells: Option<&'a S>,
    skills: Option<&'a K>,
}

pub type BattleEnv<'a> = Env<'a, dyn SpellOracle + 'a, dyn SkillOracle + 'a>;

impl<'a, S, K> Env<'a, S, K>
where
    S: SpellOracle + ?Sized,
    K: SkillOracle + ?Sized,
{
    pub fn new(spells: Option<&'a S>, skills: Option<&'a K>) -> Self {
        Self { spells, skills }
    }

    pub fn with_all(spells: &'a S, skills: &'a K) -> Self {
        Self::new(Some(spells), Some(skills))
    }

    pub fn empty() -> Self {
        Self {
            spells: None,
            skills: None,
        }
    }

    /// Returns the SpellOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SpellsNotAvailable` if no spell oracle was provided.
    pub fn spells(&self) -> Result<&'a S, OracleError> {
        self.spells.ok_or(OracleError::SpellsNotAvailable)
    }

    /// Returns the SkillOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SkillsNotAvailable` if no skill oracle was provided.
    pub fn skills(&self) -> Result<&'a K, OracleError> {
        self.skills.ok_or(OracleError::SkillsNotAvailable)
    }
}
