//! Participant state: one combatant's in-combat view.
//!
//! A participant is the normalized combat-facing representation of a character
//! or unit. It is pure data; all mutation flows through the engine's action
//! pipeline.
//!
//! # Invariants
//!
//! - `0 <= stats.hp.current <= stats.hp.max` after every mutation
//! - `condition` is a function of current HP and `source`: characters drop
//!   unconscious at 0 HP, units die
//! - Non-active participants stay in the initiative order; they are skipped,
//!   never removed

use std::collections::{BTreeMap, BTreeSet};

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::BattleConfig;
use crate::dice::DiceExpr;
use crate::trigger::ActiveSkill;

use super::effect::{ActiveEffect, StatKind};

// ============================================================================
// Identifiers
// ============================================================================

/// Unique id of a participant within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantId(pub u32);

impl core::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "participant#{}", self.0)
    }
}

/// Catalog id of a spell.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpellId(pub String);

impl SpellId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SpellId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog id of a skill.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SkillId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Identity
// ============================================================================

/// Which side of the battle a participant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

/// Where a participant was created from.
///
/// The distinction drives the death rule: player characters drop unconscious
/// at 0 HP, units die outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceKind {
    Character,
    Unit,
}

/// A participant's fitness to act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Active,
    Unconscious,
    Dead,
}

// ============================================================================
// Combat Stats
// ============================================================================

/// A current/max pair, clamped on every mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    pub current: u32,
    pub max: u32,
}

impl ResourcePool {
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }
}

/// The numeric combat block of a participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub hp: ResourcePool,

    /// Temporary hit points absorb damage before current HP and are never
    /// restored by healing.
    pub temp_hp: u32,
    pub armor_class: i32,
    pub condition: Condition,
    pub morale: i32,
    pub speed: u32,
    pub level: u32,

    /// Base attack stat consulted by complex trigger comparisons.
    pub attack: i32,
}

impl CombatStats {
    pub fn new(max_hp: u32, armor_class: i32) -> Self {
        Self {
            hp: ResourcePool::full(max_hp),
            temp_hp: 0,
            armor_class,
            condition: Condition::Active,
            morale: 0,
            speed: 30,
            level: 1,
            attack: 0,
        }
    }

    /// Base value of a comparable stat, before active effects.
    pub fn base_stat(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Hp => self.hp.current as i32,
            StatKind::Attack => self.attack,
            StatKind::ArmorClass => self.armor_class,
            StatKind::Speed => self.speed as i32,
            StatKind::Morale => self.morale,
            StatKind::Level => self.level as i32,
        }
    }

    /// The stat's maximum, where one exists (HP only).
    pub fn stat_maximum(&self, stat: StatKind) -> Option<u32> {
        match stat {
            StatKind::Hp => Some(self.hp.max),
            _ => None,
        }
    }
}

// ============================================================================
// Action Economy
// ============================================================================

/// The per-turn budget an action spends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionCost {
    Action,
    BonusAction,
}

bitflags! {
    /// Consumed action slots for the current turn.
    ///
    /// Cleared when the participant's own turn begins, not globally per round.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActionFlags: u8 {
        const ACTION       = 1 << 0;
        const BONUS_ACTION = 1 << 1;
    }
}

impl ActionFlags {
    fn bit(cost: ActionCost) -> ActionFlags {
        match cost {
            ActionCost::Action => ActionFlags::ACTION,
            ActionCost::BonusAction => ActionFlags::BONUS_ACTION,
        }
    }

    /// True if the slot for `cost` has already been spent this turn.
    pub fn has_spent(&self, cost: ActionCost) -> bool {
        self.contains(Self::bit(cost))
    }

    /// Marks the slot for `cost` as spent.
    pub fn spend(&mut self, cost: ActionCost) {
        self.insert(Self::bit(cost));
    }

    /// Clears both slots at the start of the owner's turn.
    pub fn reset(&mut self) {
        *self = ActionFlags::empty();
    }
}

// ============================================================================
// Spellcasting
// ============================================================================

/// One spell-slot level's pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellSlot {
    pub max: u32,
    pub current: u32,
}

/// A participant's spellcasting block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spellcasting {
    pub known_spells: BTreeSet<SpellId>,
    pub slots: BTreeMap<u8, SpellSlot>,
}

impl Spellcasting {
    pub fn knows(&self, spell: &SpellId) -> bool {
        self.known_spells.contains(spell)
    }

    /// True if a slot of `level` is available (level 0 is always free).
    pub fn slot_available(&self, level: u8) -> bool {
        level == 0 || self.slots.get(&level).is_some_and(|s| s.current > 0)
    }

    /// Decrements the slot pool at `level`. Level 0 consumes nothing.
    ///
    /// Returns false if no slot was available; callers validate first.
    pub fn consume_slot(&mut self, level: u8) -> bool {
        if level == 0 {
            return true;
        }
        match self.slots.get_mut(&level) {
            Some(slot) if slot.current > 0 => {
                slot.current -= 1;
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// Attacks & Traits
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackKind {
    Melee,
    Ranged,
}

/// A weapon or natural attack profile carried on the participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackProfile {
    pub name: String,
    pub kind: AttackKind,
    pub attack_bonus: i32,
    pub damage: DiceExpr,
    pub damage_type: String,
    pub cost: ActionCost,

    /// Guaranteed damage dealt on a miss instead of zero.
    #[cfg_attr(feature = "serde", serde(default))]
    pub miss_floor: Option<u32>,
}

/// Race/ability-derived special-case rules consulted during resolution.
///
/// Kept as a flat tagged list rather than a hierarchy so the resolution
/// algorithm stays a plain function of data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveTrait {
    /// Advantage on ranged attack rolls.
    RangedAdvantage,
    /// Advantage on melee attack rolls.
    MeleeAdvantage,
}

impl PassiveTrait {
    pub fn grants_advantage(self, kind: AttackKind) -> bool {
        matches!(
            (self, kind),
            (PassiveTrait::RangedAdvantage, AttackKind::Ranged)
                | (PassiveTrait::MeleeAdvantage, AttackKind::Melee)
        )
    }
}

// ============================================================================
// Participant
// ============================================================================

/// One combatant's complete in-combat state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub side: Side,
    pub source: SourceKind,
    pub avatar: Option<String>,

    pub stats: CombatStats,
    pub flags: ActionFlags,
    pub spellcasting: Spellcasting,

    /// Available weapon/natural attack profiles.
    pub attacks: Vec<AttackProfile>,

    /// Trigger-bearing skills currently in effect (granted by the external
    /// skill-tree reader at battle setup).
    pub skills: Vec<ActiveSkill>,

    /// Timed modifiers, in attachment order.
    pub effects: ArrayVec<ActiveEffect, { BattleConfig::MAX_ACTIVE_EFFECTS }>,

    pub traits: Vec<PassiveTrait>,

    /// Per-battle trigger-usage counters for once/twice-per-battle skills.
    pub skill_uses: BTreeMap<SkillId, u32>,
}

impl Participant {
    pub fn new(
        id: ParticipantId,
        name: impl Into<String>,
        side: Side,
        source: SourceKind,
        stats: CombatStats,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            source,
            avatar: None,
            stats,
            flags: ActionFlags::empty(),
            spellcasting: Spellcasting::default(),
            attacks: Vec::new(),
            skills: Vec::new(),
            effects: ArrayVec::new(),
            traits: Vec::new(),
            skill_uses: BTreeMap::new(),
        }
    }

    pub fn with_attack(mut self, attack: AttackProfile) -> Self {
        self.attacks.push(attack);
        self
    }

    pub fn with_skill(mut self, skill: ActiveSkill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn with_trait(mut self, passive: PassiveTrait) -> Self {
        self.traits.push(passive);
        self
    }

    pub fn with_spell(mut self, spell: SpellId) -> Self {
        self.spellcasting.known_spells.insert(spell);
        self
    }

    pub fn with_slots(mut self, level: u8, count: u32) -> Self {
        self.spellcasting.slots.insert(
            level,
            SpellSlot {
                max: count,
                current: count,
            },
        );
        self
    }

    /// Quick check that this participant may act (the turn machine skips
    /// anyone failing this, and the resolvers reject them as actors).
    #[inline]
    pub fn is_active(&self) -> bool {
        self.stats.condition == Condition::Active
    }

    /// Looks up an attack profile by name.
    pub fn attack_profile(&self, name: &str) -> Option<&AttackProfile> {
        self.attacks.iter().find(|a| a.name == name)
    }

    /// True if any passive trait grants advantage for this attack kind.
    pub fn has_advantage(&self, kind: AttackKind) -> bool {
        self.traits.iter().any(|t| t.grants_advantage(kind))
    }

    /// Effective value of a stat with active effects applied in attachment
    /// order. HP is reported as-is; effects on HP are periodic, not static.
    pub fn effective_stat(&self, stat: StatKind) -> i32 {
        let base = self.stats.base_stat(stat);
        if stat == StatKind::Hp {
            return base;
        }
        self.effects
            .iter()
            .filter(|e| e.stat == stat)
            .fold(base, |acc, e| e.value.modify(acc))
    }

    /// Effective armor class for hit checks.
    pub fn effective_ac(&self) -> i32 {
        self.effective_stat(StatKind::ArmorClass)
    }

    /// Attaches a timed effect. Silently dropped when the effect list is
    /// full; the cap is a content-authoring bound, not a rules outcome.
    pub fn add_effect(&mut self, effect: ActiveEffect) {
        if !self.effects.is_full() {
            self.effects.push(effect);
        }
    }

    /// How many times a limited-use skill has fired this battle.
    pub fn skill_use_count(&self, skill: &SkillId) -> u32 {
        self.skill_uses.get(skill).copied().unwrap_or(0)
    }

    /// Records one firing of a limited-use skill.
    pub fn record_skill_use(&mut self, skill: &SkillId) {
        *self.skill_uses.entry(skill.clone()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EffectValue;

    fn participant() -> Participant {
        Participant::new(
            ParticipantId(1),
            "Vex",
            Side::Ally,
            SourceKind::Character,
            CombatStats::new(20, 14),
        )
    }

    #[test]
    fn action_flags_are_independent() {
        let mut flags = ActionFlags::empty();
        flags.spend(ActionCost::Action);
        assert!(flags.has_spent(ActionCost::Action));
        assert!(!flags.has_spent(ActionCost::BonusAction));
        flags.reset();
        assert!(!flags.has_spent(ActionCost::Action));
    }

    #[test]
    fn slot_consumption() {
        let mut casting = Spellcasting::default();
        casting.slots.insert(1, SpellSlot { max: 2, current: 1 });
        assert!(casting.slot_available(1));
        assert!(casting.consume_slot(1));
        assert!(!casting.slot_available(1));
        assert!(!casting.consume_slot(1));
        // Cantrips never consume slots.
        assert!(casting.slot_available(0));
        assert!(casting.consume_slot(0));
    }

    #[test]
    fn effective_ac_applies_effects_in_order() {
        let mut p = participant();
        p.add_effect(ActiveEffect {
            name: "shield of faith".into(),
            stat: StatKind::ArmorClass,
            value: EffectValue::Flat(2),
            duration: Some(3),
            max_triggers: 0,
            times_triggered: 0,
        });
        assert_eq!(p.effective_ac(), 16);

        p.add_effect(ActiveEffect {
            name: "sundered plate".into(),
            stat: StatKind::ArmorClass,
            value: EffectValue::Percent(-50),
            duration: None,
            max_triggers: 0,
            times_triggered: 0,
        });
        assert_eq!(p.effective_ac(), 8);
    }

    #[test]
    fn advantage_comes_from_traits() {
        let p = participant().with_trait(PassiveTrait::RangedAdvantage);
        assert!(p.has_advantage(AttackKind::Ranged));
        assert!(!p.has_advantage(AttackKind::Melee));
    }

    #[test]
    fn skill_use_counters() {
        let mut p = participant();
        let id = SkillId::new("second-wind");
        assert_eq!(p.skill_use_count(&id), 0);
        p.record_skill_use(&id);
        p.record_skill_use(&id);
        assert_eq!(p.skill_use_count(&id), 2);
    }
}
