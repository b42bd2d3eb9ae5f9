//! Skill catalog loader.
//!
//! Loads skill definitions from RON data files. Which participant carries
//! which skill is progression data owned elsewhere; this catalog only knows
//! the definitions.

use std::collections::HashMap;

use anyhow::Context;
use battle_core::{ActiveSkill, SkillId};

/// Registry of skill definitions, keyed by id.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    skills: HashMap<SkillId, ActiveSkill>,
}

impl SkillCatalog {
    /// Loads all skill definitions from the embedded RON data file.
    pub fn load() -> anyhow::Result<Self> {
        let ron = include_str!("../../data/skills.ron");
        Self::from_ron(ron)
    }

    /// Parses a catalog from RON text (used by tests and custom content).
    pub fn from_ron(ron: &str) -> anyhow::Result<Self> {
        let definitions: Vec<ActiveSkill> =
            ron::from_str(ron).context("failed to parse skill catalog")?;
        let mut skills = HashMap::new();
        for def in definitions {
            skills.insert(def.id.clone(), def);
        }
        Ok(Self { skills })
    }

    /// Gets a skill definition by id.
    pub fn get(&self, id: &SkillId) -> Option<&ActiveSkill> {
        self.skills.get(id)
    }

    /// Returns an iterator over all registered skill ids.
    pub fn ids(&self) -> impl Iterator<Item = &SkillId> {
        self.skills.keys()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
