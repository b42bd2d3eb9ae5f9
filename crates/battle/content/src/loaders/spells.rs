//! Spell catalog loader.
//!
//! Loads spell definitions from RON data files.

use std::collections::HashMap;

use anyhow::Context;
use battle_core::{SpellDefinition, SpellId};

/// Registry of spell definitions, keyed by id.
#[derive(Debug, Clone)]
pub struct SpellCatalog {
    spells: HashMap<SpellId, SpellDefinition>,
}

impl SpellCatalog {
    /// Loads all spell definitions from the embedded RON data file.
    pub fn load() -> anyhow::Result<Self> {
        let ron = include_str!("../../data/spells.ron");
        Self::from_ron(ron)
    }

    /// Parses a catalog from RON text (used by tests and custom content).
    pub fn from_ron(ron: &str) -> anyhow::Result<Self> {
        let definitions: Vec<SpellDefinition> =
            ron::from_str(ron).context("failed to parse spell catalog")?;
        let mut spells = HashMap::new();
        for def in definitions {
            spells.insert(def.id.clone(), def);
        }
        Ok(Self { spells })
    }

    /// Gets a spell definition by id.
    pub fn get(&self, id: &SpellId) -> Option<&SpellDefinition> {
        self.spells.get(id)
    }

    /// Returns an iterator over all registered spell ids.
    pub fn ids(&self) -> impl Iterator<Item = &SpellId> {
        self.spells.keys()
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{SavePolicy, SpellKind, SpellTargeting};

    #[test]
    fn test_load_spell_catalog() {
        let catalog = SpellCatalog::load().expect("failed to load spell catalog");

        assert!(catalog.len() >= 5, "should have at least 5 spells");

        // Verify the save-for-half AOE
        let burst = catalog
            .get(&SpellId::new("scorching-burst"))
            .expect("scorching-burst missing");
        assert_eq!(burst.level, 1);
        assert_eq!(burst.targeting, SpellTargeting::Aoe);
        assert_eq!(burst.dice.count, 2);
        assert_eq!(burst.dice.faces, 6);
        let save = burst.saving_throw.expect("burst has a save");
        assert_eq!(save.dc, 13);
        assert_eq!(save.on_success, SavePolicy::Half);

        // Verify a cantrip with a hit check
        let bolt = catalog
            .get(&SpellId::new("fire-bolt"))
            .expect("fire-bolt missing");
        assert_eq!(bolt.level, 0);
        assert!(bolt.hit_check.is_some());

        // Verify a heal
        let cure = catalog
            .get(&SpellId::new("cure-wounds"))
            .expect("cure-wounds missing");
        assert_eq!(cure.kind, SpellKind::Heal);
    }

    #[test]
    fn test_timed_effect_spell() {
        let catalog = SpellCatalog::load().unwrap();
        let venom = catalog.get(&SpellId::new("venom-lash")).unwrap();
        let effect = venom.effect.as_ref().expect("venom-lash attaches an effect");
        assert_eq!(effect.duration, Some(3));
        assert_eq!(effect.max_triggers, 3);
    }
}
