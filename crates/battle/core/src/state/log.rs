//! Append-only battle log with pre-action snapshots.
//!
//! Every successfully resolved action appends exactly one [`BattleAction`]
//! carrying the full roster/cursor state captured *before* the mutation. The
//! snapshot is an owned deep copy — later mutation of the live roster never
//! reaches a stored entry — which makes it the sole undo mechanism.

use crate::combat::{HitOutcome, SavePolicy};
use crate::state::{Condition, EffectDelta, Participant, ParticipantId, SkillId, SpellId};

// ============================================================================
// Snapshot
// ============================================================================

/// Deep copy of the rollback-relevant battle state.
///
/// Owned clones all the way down; structural equality is what the atomicity
/// tests compare.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateSnapshot {
    pub initiative: Vec<Participant>,
    pub turn_index: usize,
    pub round: u32,
}

// ============================================================================
// Outcome payloads
// ============================================================================

/// The value an action actually applied to one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedValue {
    Damage {
        /// Computed damage before clamping.
        planned: u32,
        /// HP actually removed (temp HP absorption and clamping applied).
        actual: u32,
    },
    Healing {
        planned: u32,
        actual: u32,
    },
    /// Target was skipped (absent from the roster, already down, or out of
    /// the spell's scope) but is still recorded.
    NoEffect,
}

/// Per-target saving-throw record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveReport {
    pub roll: u8,
    pub dc: i32,
    pub success: bool,
    pub policy: SavePolicy,
}

/// Spell-level hit-check record (one roll gates the whole cast).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitCheckReport {
    pub roll: u8,
    pub dc: i32,
    pub success: bool,
}

/// What one supplied target id ended up with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetReport {
    pub target: ParticipantId,
    pub save: Option<SaveReport>,
    pub applied: AppliedValue,
    pub hp_after: Option<u32>,
    pub condition_after: Option<Condition>,
    /// Name of the timed effect attached, if the spell declared one.
    pub effect_attached: Option<String>,
}

/// Outcome payload of a resolved attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub attacker: ParticipantId,
    pub target: ParticipantId,
    pub attack: String,
    pub roll: u8,
    pub advantage_roll: Option<u8>,
    pub advantage_applied: bool,
    /// The roll the comparison actually used.
    pub resolved_roll: u8,
    pub attack_bonus: i32,
    pub target_ac: i32,
    pub outcome: HitOutcome,
    pub damage: u32,
    pub target_hp_after: u32,
    pub target_condition: Condition,
    pub fired_skills: Vec<SkillId>,
}

/// Outcome payload of a resolved spell cast.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellReport {
    pub caster: ParticipantId,
    pub spell: SpellId,
    pub level: u8,
    pub slot_consumed: bool,
    pub hit_check: Option<HitCheckReport>,
    pub targets: Vec<TargetReport>,
    pub fired_skills: Vec<SkillId>,
}

/// Outcome payload of a bonus-action skill use.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillReport {
    pub owner: ParticipantId,
    pub skill: SkillId,
    /// Deltas the trigger produced (instant ones already applied, timed ones
    /// attached).
    pub deltas: Vec<EffectDelta>,
    pub hp_after: u32,
}

/// The action-specific payload of a log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    Attack(AttackReport),
    Spell(SpellReport),
    Skill(SkillReport),
}

impl ActionOutcome {
    /// The participant that performed the action.
    pub fn actor(&self) -> ParticipantId {
        match self {
            ActionOutcome::Attack(r) => r.attacker,
            ActionOutcome::Spell(r) => r.caster,
            ActionOutcome::Skill(r) => r.owner,
        }
    }
}

// ============================================================================
// Log
// ============================================================================

/// One immutable log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleAction {
    /// 0-based position, assigned at append time and never reused.
    pub action_index: usize,
    pub actor: ParticipantId,
    pub outcome: ActionOutcome,
    /// Roster/cursor state immediately before the action mutated anything.
    pub state_before: StateSnapshot,
}

/// Append-only sequence of resolved actions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    entries: Vec<BattleAction>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, assigning `action_index = len()`.
    pub fn append(&mut self, outcome: ActionOutcome, state_before: StateSnapshot) -> &BattleAction {
        let entry = BattleAction {
            action_index: self.entries.len(),
            actor: outcome.actor(),
            outcome,
            state_before,
        };
        self.entries.push(entry);
        self.entries.last().expect("entry just pushed")
    }

    pub fn get(&self, action_index: usize) -> Option<&BattleAction> {
        self.entries.get(action_index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleAction> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&BattleAction> {
        self.entries.last()
    }

    /// Drops every entry at or after `action_index` (rollback truncation).
    pub fn truncate(&mut self, action_index: usize) {
        self.entries.truncate(action_index);
    }

    /// Clears the whole log. Only the reset-battle operation calls this.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
