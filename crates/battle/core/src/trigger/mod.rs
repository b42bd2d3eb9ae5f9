//! Skill triggers and their evaluation.
//!
//! A skill carries a trigger condition. Simple triggers fire on a named
//! combat event; complex triggers compare a live stat of some participant
//! class against a threshold. Evaluation is a pure computation producing
//! [`EffectDelta`]s — skills never mutate participants directly, so outcomes
//! stay reproducible regardless of skill ordering.

mod evaluate;

pub use evaluate::{FiredTriggers, TriggerDraws, fire_single, fire_triggers};

use strum::Display;

use crate::state::{EffectTemplate, SkillId, StatKind};

/// Named combat events that simple triggers subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerEvent {
    StartRound,
    EndRound,
    BeforeOwnerAttack,
    AfterOwnerAttack,
    BeforeCast,
    AfterCast,
    /// Fired when the owner spends a bonus action on the skill itself.
    BonusAction,
}

/// Which participants a complex trigger inspects, relative to the owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerTarget {
    Ally,
    Enemy,
    Itself,
}

/// Comparison operator for complex triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    Gt,
    Lt,
    Eq,
    Le,
    Ge,
}

impl Comparison {
    pub fn holds(self, lhs: i32, rhs: i32) -> bool {
        match self {
            Comparison::Gt => lhs > rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Eq => lhs == rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Ge => lhs >= rhs,
        }
    }
}

/// How a complex trigger's threshold is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    Number,
    /// Compared against `current * 100 / max` where the stat has a maximum
    /// (HP); stats without one fall back to the plain number.
    Percent,
}

/// The condition under which a skill fires.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillTrigger {
    /// Fires whenever the named event occurs.
    Simple { event: TriggerEvent },

    /// Fires while the comparison holds against live stats.
    ///
    /// Complex triggers are re-evaluated at every evaluation point; usage
    /// limits are what keep them from firing endlessly.
    Complex {
        target: TriggerTarget,
        op: Comparison,
        stat: StatKind,
        value: i32,
        value_kind: ValueKind,
    },
}

/// Per-battle cap on how often a skill may fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsageLimit {
    #[default]
    Unlimited,
    OncePerBattle,
    TwicePerBattle,
}

impl UsageLimit {
    /// True if a skill already used `uses` times may fire again.
    pub fn permits(self, uses: u32) -> bool {
        match self {
            UsageLimit::Unlimited => true,
            UsageLimit::OncePerBattle => uses < 1,
            UsageLimit::TwicePerBattle => uses < 2,
        }
    }
}

/// A trigger-bearing skill currently in effect on a participant.
///
/// The skill-tree reader decides which skills a participant carries; the
/// engine only evaluates them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSkill {
    pub id: SkillId,
    pub name: String,
    pub trigger: SkillTrigger,

    /// Chance to fire in percent. The caller supplies the random draw; a
    /// probability skill with no draw available does not fire.
    #[cfg_attr(feature = "serde", serde(default))]
    pub probability: Option<u8>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub usage: UsageLimit,

    /// Effect payload merged into resolution when the skill fires.
    pub effects: Vec<EffectTemplate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons() {
        assert!(Comparison::Gt.holds(3, 2));
        assert!(Comparison::Le.holds(2, 2));
        assert!(!Comparison::Eq.holds(1, 2));
        assert!(Comparison::Ge.holds(5, 5));
        assert!(Comparison::Lt.holds(-1, 0));
    }

    #[test]
    fn usage_limits() {
        assert!(UsageLimit::Unlimited.permits(99));
        assert!(UsageLimit::OncePerBattle.permits(0));
        assert!(!UsageLimit::OncePerBattle.permits(1));
        assert!(UsageLimit::TwicePerBattle.permits(1));
        assert!(!UsageLimit::TwicePerBattle.permits(2));
    }
}
