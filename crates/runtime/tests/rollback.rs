//! Atomicity and rollback properties through the session façade.

use std::sync::Arc;

use battle_core::{
    ActionCost, AttackAction, AttackKind, AttackProfile, BattleErrorKind, CombatStats, DiceExpr,
    Participant, ParticipantId, Side, SourceKind,
};
use battle_content::{SkillCatalog, SpellCatalog};
use runtime::{BattleId, BattleSession, SkillOracleImpl, SpellOracleImpl};

fn claw() -> AttackProfile {
    AttackProfile {
        name: "claw".into(),
        kind: AttackKind::Melee,
        attack_bonus: 4,
        damage: DiceExpr::new(1, 6, 1),
        damage_type: "slashing".into(),
        cost: ActionCost::Action,
        miss_floor: None,
    }
}

fn combatant(id: u32, side: Side, hp: u32) -> Participant {
    Participant::new(
        ParticipantId(id),
        format!("p{id}"),
        side,
        if side == Side::Ally {
            SourceKind::Character
        } else {
            SourceKind::Unit
        },
        CombatStats::new(hp, 10),
    )
    .with_attack(claw())
}

fn session() -> BattleSession {
    let spells = SpellOracleImpl::new(SpellCatalog::load().unwrap());
    let skills = SkillOracleImpl::new(SkillCatalog::load().unwrap());
    BattleSession::new(
        BattleId(9),
        vec![
            combatant(1, Side::Ally, 30),
            combatant(2, Side::Enemy, 30),
            combatant(3, Side::Enemy, 30),
        ],
        Arc::new(spells),
        Arc::new(skills),
    )
    .unwrap()
}

fn attack(attacker: u32, target: u32, roll: u8, die: u32) -> AttackAction {
    AttackAction {
        attacker: ParticipantId(attacker),
        target: ParticipantId(target),
        attack: "claw".into(),
        attack_roll: roll,
        advantage_roll: None,
        damage_rolls: vec![die],
        trigger_draws: vec![],
    }
}

#[test]
fn rejected_request_leaves_state_bit_identical() {
    let mut session = session();
    let before = session.state().clone();

    // Unknown attacker id.
    let err = session
        .resolve_attack(attack(99, 2, 15, 4))
        .unwrap_err();
    assert_eq!(err.kind(), BattleErrorKind::NotFound);
    assert_eq!(session.state(), &before);

    // Malformed roll.
    let err = session
        .resolve_attack(attack(1, 2, 21, 4))
        .unwrap_err();
    assert_eq!(err.kind(), BattleErrorKind::Validation);
    assert_eq!(session.state(), &before);

    // Wrong die count.
    let err = session
        .resolve_attack(AttackAction {
            damage_rolls: vec![4, 4],
            ..attack(1, 2, 15, 4)
        })
        .unwrap_err();
    assert_eq!(err.kind(), BattleErrorKind::Validation);
    assert_eq!(session.state(), &before);
}

#[test]
fn log_entries_carry_pre_action_snapshots() {
    let mut session = session();

    let first = session.resolve_attack(attack(1, 2, 15, 4)).unwrap();
    assert_eq!(first.entry.action_index, 0);
    // The snapshot shows the target untouched.
    assert_eq!(
        first.entry.state_before.initiative[1].stats.hp.current,
        30
    );

    session.advance_turn().unwrap();
    let second = session.resolve_attack(attack(2, 1, 12, 3)).unwrap();
    assert_eq!(second.entry.action_index, 1);
    // The second snapshot carries the first attack's 5 damage (1d6+1).
    assert_eq!(
        second.entry.state_before.initiative[1].stats.hp.current,
        25
    );
}

#[test]
fn rollback_restores_state_and_truncates_log() {
    let mut session = session();

    session.resolve_attack(attack(1, 2, 15, 4)).unwrap();
    session.advance_turn().unwrap();
    session.resolve_attack(attack(2, 1, 12, 3)).unwrap();

    session.rollback_to(0).unwrap();

    let state = session.state();
    assert!(state.log.is_empty());
    assert_eq!(state.turn_index, 0);
    assert_eq!(state.round, 1);
    assert!(state.initiative.iter().all(|p| p.stats.hp.current == 30));
}

#[test]
fn rollback_then_replay_reproduces_identical_state() {
    let mut session = session();

    // Original sequence.
    session.resolve_attack(attack(1, 2, 15, 4)).unwrap();
    session.advance_turn().unwrap();
    session.resolve_attack(attack(2, 1, 12, 3)).unwrap();
    session.advance_turn().unwrap();
    session.resolve_attack(attack(3, 1, 18, 6)).unwrap();

    let final_state = session.state().clone();

    // Undo everything after entry 1, then replay the same actions with the
    // same supplied rolls. Entry 1's snapshot already sits after the first
    // advance, so the replay picks up from the second attack.
    session.rollback_to(1).unwrap();
    assert_eq!(session.state().log.len(), 1);

    session.resolve_attack(attack(2, 1, 12, 3)).unwrap();
    session.advance_turn().unwrap();
    session.resolve_attack(attack(3, 1, 18, 6)).unwrap();

    assert_eq!(session.state(), &final_state);
}

#[test]
fn rollback_past_truncation_is_a_state_conflict() {
    let mut session = session();
    session.resolve_attack(attack(1, 2, 15, 4)).unwrap();

    session.rollback_to(0).unwrap();

    let err = session.rollback_to(0).unwrap_err();
    assert_eq!(err.kind(), BattleErrorKind::StateConflict);
}

#[test]
fn action_indices_restart_from_truncation_point() {
    let mut session = session();
    session.resolve_attack(attack(1, 2, 15, 4)).unwrap();
    session.advance_turn().unwrap();
    session.resolve_attack(attack(2, 1, 12, 3)).unwrap();

    session.rollback_to(1).unwrap();

    let replacement = session.resolve_attack(attack(2, 3, 12, 3)).unwrap();
    assert_eq!(replacement.entry.action_index, 1);
}

#[test]
fn reset_restores_initial_state_and_clears_log() {
    let mut session = session();
    session.resolve_attack(attack(1, 2, 15, 4)).unwrap();
    session.advance_turn().unwrap();
    session.resolve_attack(attack(2, 1, 12, 3)).unwrap();

    session.reset();

    let state = session.state();
    assert!(state.log.is_empty());
    assert_eq!(state.round, 1);
    assert!(state.initiative.iter().all(|p| p.stats.hp.current == 30));
}
