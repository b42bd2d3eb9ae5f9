//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe one encounter: the
//! participant roster, the turn cursor, and the append-only log. Request
//! layers clone or query this state but mutate it exclusively through the
//! engine.

pub mod effect;
pub mod log;
pub mod participant;

pub use effect::{ActiveEffect, EffectDelta, EffectTemplate, EffectValue, StatKind};
pub use log::{
    ActionOutcome, AppliedValue, AttackReport, BattleAction, BattleLog, HitCheckReport, SaveReport,
    SkillReport, SpellReport, StateSnapshot, TargetReport,
};
pub use participant::{
    ActionCost, ActionFlags, AttackKind, AttackProfile, CombatStats, Condition, Participant,
    ParticipantId, PassiveTrait, ResourcePool, Side, SkillId, SourceKind, SpellId, SpellSlot,
    Spellcasting,
};

/// Lifecycle phase of a battle. Only `Active` accepts resolution requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    Prepared,
    Active,
    Completed,
}

/// Errors raised while assembling or starting a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("battle needs at least one participant")]
    EmptyRoster,

    #[error("duplicate participant id {0}")]
    DuplicateParticipant(ParticipantId),

    #[error("roster of {len} exceeds the {max}-participant cap")]
    RosterTooLarge { len: usize, max: usize },

    #[error("battle already started (phase {0:?})")]
    AlreadyStarted(BattlePhase),
}

/// Canonical state of one encounter.
///
/// The initiative order is fixed at battle start: membership and ordering
/// never change mid-battle, and downed participants stay in place so that
/// log indices keep addressing the same slots.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub phase: BattlePhase,

    /// Current round, starting at 1.
    pub round: u32,

    /// Cursor into `initiative`, wrapping modulo roster length.
    pub turn_index: usize,

    /// The fixed turn sequence.
    pub initiative: Vec<Participant>,

    pub log: BattleLog,
}

impl BattleState {
    /// Creates a prepared battle from an initiative-ordered roster.
    pub fn new(initiative: Vec<Participant>) -> Result<Self, SetupError> {
        if initiative.is_empty() {
            return Err(SetupError::EmptyRoster);
        }
        for (i, p) in initiative.iter().enumerate() {
            if initiative[..i].iter().any(|q| q.id == p.id) {
                return Err(SetupError::DuplicateParticipant(p.id));
            }
        }
        Ok(Self {
            phase: BattlePhase::Prepared,
            round: 1,
            turn_index: 0,
            initiative,
            log: BattleLog::new(),
        })
    }

    /// Moves a prepared battle into the active phase.
    ///
    /// The first participant's action flags start cleared; initiative order
    /// itself was fixed by the caller before construction.
    pub fn start(&mut self) -> Result<(), SetupError> {
        if self.phase != BattlePhase::Prepared {
            return Err(SetupError::AlreadyStarted(self.phase));
        }
        self.phase = BattlePhase::Active;
        if let Some(first) = self.initiative.get_mut(self.turn_index) {
            first.flags.reset();
        }
        Ok(())
    }

    /// Marks the battle finished. No further resolution is accepted.
    pub fn complete(&mut self) {
        self.phase = BattlePhase::Completed;
    }

    pub fn is_active(&self) -> bool {
        self.phase == BattlePhase::Active
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.initiative.iter().find(|p| p.id == id)
    }

    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.initiative.iter_mut().find(|p| p.id == id)
    }

    pub fn index_of(&self, id: ParticipantId) -> Option<usize> {
        self.initiative.iter().position(|p| p.id == id)
    }

    /// The participant whose turn it currently is.
    pub fn current(&self) -> &Participant {
        &self.initiative[self.turn_index]
    }

    /// Captures a deep copy of the rollback-relevant state.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            initiative: self.initiative.clone(),
            turn_index: self.turn_index,
            round: self.round,
        }
    }

    /// Restores roster and cursor from a snapshot. The log and phase are
    /// managed by the caller (engine rollback truncates, execute does not).
    pub fn restore(&mut self, snapshot: StateSnapshot) {
        self.initiative = snapshot.initiative;
        self.turn_index = snapshot.turn_index;
        self.round = snapshot.round;
    }

    /// True if every participant on `side` is out of the fight.
    pub fn side_down(&self, side: Side) -> bool {
        self.initiative
            .iter()
            .filter(|p| p.side == side)
            .all(|p| !p.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new(
                ParticipantId(1),
                "Vex",
                Side::Ally,
                SourceKind::Character,
                CombatStats::new(20, 14),
            ),
            Participant::new(
                ParticipantId(2),
                "Ghoul",
                Side::Enemy,
                SourceKind::Unit,
                CombatStats::new(12, 11),
            ),
        ]
    }

    #[test]
    fn rejects_empty_and_duplicate_rosters() {
        assert_eq!(BattleState::new(vec![]), Err(SetupError::EmptyRoster));

        let mut dup = roster();
        dup[1].id = ParticipantId(1);
        assert_eq!(
            BattleState::new(dup),
            Err(SetupError::DuplicateParticipant(ParticipantId(1)))
        );
    }

    #[test]
    fn start_only_from_prepared() {
        let mut battle = BattleState::new(roster()).unwrap();
        assert!(battle.start().is_ok());
        assert_eq!(
            battle.start(),
            Err(SetupError::AlreadyStarted(BattlePhase::Active))
        );
    }

    #[test]
    fn snapshot_is_independent_of_live_state() {
        let mut battle = BattleState::new(roster()).unwrap();
        battle.start().unwrap();

        let snapshot = battle.snapshot();
        battle.initiative[0].stats.hp.current = 1;
        battle.round = 5;

        assert_eq!(snapshot.initiative[0].stats.hp.current, 20);
        assert_eq!(snapshot.round, 1);

        battle.restore(snapshot);
        assert_eq!(battle.initiative[0].stats.hp.current, 20);
        assert_eq!(battle.round, 1);
    }

    #[test]
    fn side_down_tracks_conditions() {
        let mut battle = BattleState::new(roster()).unwrap();
        assert!(!battle.side_down(Side::Enemy));
        battle.initiative[1].stats.condition = Condition::Dead;
        assert!(battle.side_down(Side::Enemy));
        assert!(!battle.side_down(Side::Ally));
    }
}
