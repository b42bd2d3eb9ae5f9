//! Spell catalog definitions.
//!
//! Spell definitions are static content: the engine looks them up by id and
//! never stores them in battle state. A definition describes the shape of the
//! dice the caller must supply, not rolls the engine makes.

use crate::combat::SavePolicy;
use crate::dice::DiceExpr;
use crate::state::{ActionCost, EffectTemplate, SpellId};

/// Ability score a check or save keys off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

/// How a spell selects its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellTargeting {
    /// Applies to exactly the supplied ids. The engine does not enforce
    /// min/max counts; upstream layers apply target-count bonuses.
    Target,
    /// Applies to all supplied ids uniformly.
    Aoe,
    /// Applies to the caster.
    NoTarget,
}

/// Which sides (relative to the caster) the spell affects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellScope {
    Enemies,
    Allies,
    All,
}

impl SpellScope {
    /// True if a target on `relation` (Ally = same side as the caster) is
    /// inside this scope.
    pub fn covers_ally(self) -> bool {
        matches!(self, SpellScope::Allies | SpellScope::All)
    }

    pub fn covers_enemy(self) -> bool {
        matches!(self, SpellScope::Enemies | SpellScope::All)
    }
}

/// What the spell's dice do to an affected target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellKind {
    Damage,
    Heal,
    /// Damages enemies and heals allies in one cast, judged per target
    /// relative to the caster's side.
    Mixed,
}

/// Per-target roll-vs-DC check that can halve or negate the effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavingThrowDef {
    pub ability: Ability,
    pub dc: i32,
    pub on_success: SavePolicy,
}

/// Roll-vs-DC check gating whether the spell's effect applies at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitCheckDef {
    pub ability: Ability,
    pub dc: i32,
}

/// Static definition of one spell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: SpellId,
    pub name: String,

    /// Slot level. 0 is a cantrip and consumes nothing.
    pub level: u8,

    /// Action budget the cast spends, derived from the casting-time text at
    /// authoring time.
    pub cost: ActionCost,

    pub targeting: SpellTargeting,
    pub scope: SpellScope,
    pub kind: SpellKind,
    pub dice: DiceExpr,

    #[cfg_attr(feature = "serde", serde(default))]
    pub saving_throw: Option<SavingThrowDef>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub hit_check: Option<HitCheckDef>,

    /// Timed effect attached to each affected target.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<EffectTemplate>,
}

/// Read-only spell catalog lookup.
pub trait SpellOracle {
    fn spell(&self, id: &SpellId) -> Option<&SpellDefinition>;
}
