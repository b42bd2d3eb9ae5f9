//! Oracle implementations backed by content catalogs.
//!
//! battle-content owns the static definitions; these adapters expose them
//! through the core's oracle traits, plus the unlock table that stands in
//! for the external skill-tree progression reader.

use std::collections::HashMap;

use battle_core::{
    ActiveSkill, ParticipantId, SkillId, SkillOracle, SpellDefinition, SpellId, SpellOracle,
};
use battle_content::{SkillCatalog, SpellCatalog};

/// Spell oracle backed by the RON spell catalog.
#[derive(Debug, Clone)]
pub struct SpellOracleImpl {
    catalog: SpellCatalog,
}

impl SpellOracleImpl {
    pub fn new(catalog: SpellCatalog) -> Self {
        Self { catalog }
    }
}

impl SpellOracle for SpellOracleImpl {
    fn spell(&self, id: &SpellId) -> Option<&SpellDefinition> {
        self.catalog.get(id)
    }
}

/// Skill oracle combining the skill catalog with per-participant unlock
/// state read from the progression system.
#[derive(Debug, Clone)]
pub struct SkillOracleImpl {
    catalog: SkillCatalog,
    unlocks: HashMap<ParticipantId, Vec<SkillId>>,
}

impl SkillOracleImpl {
    pub fn new(catalog: SkillCatalog) -> Self {
        Self {
            catalog,
            unlocks: HashMap::new(),
        }
    }

    /// Records that a participant has a skill unlocked.
    pub fn grant(&mut self, participant: ParticipantId, skill: SkillId) {
        self.unlocks.entry(participant).or_default().push(skill);
    }
}

impl SkillOracle for SkillOracleImpl {
    fn skill(&self, id: &SkillId) -> Option<&ActiveSkill> {
        self.catalog.get(id)
    }

    fn unlocked(&self, participant: ParticipantId) -> Vec<SkillId> {
        self.unlocks.get(&participant).cloned().unwrap_or_default()
    }
}
