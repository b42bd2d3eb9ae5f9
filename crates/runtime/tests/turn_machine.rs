//! Turn/initiative state machine properties, driven on the engine directly.

use battle_core::{
    ActionCost, ActiveEffect, ActiveSkill, BattleEngine, BattleResult, BattleState, CombatStats,
    Condition, EffectTemplate, EffectValue, Participant, ParticipantId, Side, SkillId, SkillTrigger,
    SourceKind, StatKind, TriggerEvent, TurnError, UsageLimit,
};

fn participant(id: u32, side: Side, source: SourceKind) -> Participant {
    Participant::new(
        ParticipantId(id),
        format!("p{id}"),
        side,
        source,
        CombatStats::new(20, 12),
    )
}

fn battle(roster: Vec<Participant>) -> BattleState {
    let mut state = BattleState::new(roster).unwrap();
    state.start().unwrap();
    state
}

#[test]
fn n_advances_return_cursor_and_add_one_round() {
    let mut state = battle(vec![
        participant(1, Side::Ally, SourceKind::Character),
        participant(2, Side::Enemy, SourceKind::Unit),
        participant(3, Side::Enemy, SourceKind::Unit),
    ]);
    let mut engine = BattleEngine::new(&mut state);

    for _ in 0..3 {
        engine.advance_turn().unwrap();
    }
    assert_eq!(state.turn_index, 0);
    assert_eq!(state.round, 2);
}

#[test]
fn downed_participants_are_skipped_without_extra_rounds() {
    let mut state = battle(vec![
        participant(1, Side::Ally, SourceKind::Character),
        participant(2, Side::Enemy, SourceKind::Unit),
        participant(3, Side::Ally, SourceKind::Character),
    ]);
    state.initiative[1].stats.condition = Condition::Dead;

    let mut engine = BattleEngine::new(&mut state);

    // From index 0, index 1 is dead, so the cursor lands on 2.
    let advance = engine.advance_turn().unwrap();
    assert_eq!(advance.turn_index, 2);
    assert!(!advance.wrapped);

    // Wrapping back to 0 crosses the boundary exactly once.
    let advance = engine.advance_turn().unwrap();
    assert_eq!(advance.turn_index, 0);
    assert!(advance.wrapped);
    assert_eq!(state.round, 2);
}

#[test]
fn skip_across_wrap_increments_round_once() {
    let mut state = battle(vec![
        participant(1, Side::Ally, SourceKind::Character),
        participant(2, Side::Enemy, SourceKind::Unit),
        participant(3, Side::Enemy, SourceKind::Unit),
    ]);
    // Last two slots are down; from index 0 the cursor must wrap back to 0.
    state.initiative[1].stats.condition = Condition::Dead;
    state.initiative[2].stats.condition = Condition::Dead;

    let mut engine = BattleEngine::new(&mut state);
    let advance = engine.advance_turn().unwrap();
    assert_eq!(advance.turn_index, 0);
    assert!(advance.wrapped);
    assert_eq!(advance.round, 2);
}

#[test]
fn flags_reset_when_own_turn_begins() {
    let mut state = battle(vec![
        participant(1, Side::Ally, SourceKind::Character),
        participant(2, Side::Enemy, SourceKind::Unit),
    ]);
    state.initiative[0].flags.spend(ActionCost::Action);
    state.initiative[0].flags.spend(ActionCost::BonusAction);

    let mut engine = BattleEngine::new(&mut state);
    engine.advance_turn().unwrap(); // to participant 2
    assert!(state.initiative[0].flags.has_spent(ActionCost::Action));

    let mut engine = BattleEngine::new(&mut state);
    engine.advance_turn().unwrap(); // back to participant 1
    assert!(!state.initiative[0].flags.has_spent(ActionCost::Action));
    assert!(!state.initiative[0].flags.has_spent(ActionCost::BonusAction));
}

#[test]
fn effect_durations_tick_on_wrap_and_expire() {
    let mut state = battle(vec![
        participant(1, Side::Ally, SourceKind::Character),
        participant(2, Side::Enemy, SourceKind::Unit),
    ]);
    state.initiative[0].add_effect(ActiveEffect {
        name: "shield-of-faith".into(),
        stat: StatKind::ArmorClass,
        value: EffectValue::Flat(2),
        duration: Some(2),
        max_triggers: 0,
        times_triggered: 0,
    });
    assert_eq!(state.initiative[0].effective_ac(), 14);

    let mut engine = BattleEngine::new(&mut state);
    engine.advance_turn().unwrap();
    engine.advance_turn().unwrap(); // wrap 1
    assert_eq!(state.initiative[0].effects[0].duration, Some(1));

    let mut engine = BattleEngine::new(&mut state);
    engine.advance_turn().unwrap();
    engine.advance_turn().unwrap(); // wrap 2
    assert!(state.initiative[0].effects.is_empty());
    assert_eq!(state.initiative[0].effective_ac(), 12);
}

#[test]
fn periodic_hp_effect_respects_max_triggers() {
    let mut state = battle(vec![
        participant(1, Side::Ally, SourceKind::Character),
        participant(2, Side::Enemy, SourceKind::Unit),
    ]);
    state.initiative[1].add_effect(ActiveEffect {
        name: "envenomed".into(),
        stat: StatKind::Hp,
        value: EffectValue::Flat(-2),
        duration: Some(5),
        max_triggers: 2,
        times_triggered: 0,
    });

    for _ in 0..3 {
        let mut engine = BattleEngine::new(&mut state);
        engine.advance_turn().unwrap();
        engine.advance_turn().unwrap(); // one wrap per pair
    }

    // Two ticks of 2 damage, then the cap stops further re-application.
    assert_eq!(state.initiative[1].stats.hp.current, 16);
}

#[test]
fn start_round_triggers_fire_on_wrap() {
    let mut state = battle(vec![
        participant(1, Side::Ally, SourceKind::Character),
        participant(2, Side::Enemy, SourceKind::Unit),
    ]);
    state.initiative[0].skills.push(ActiveSkill {
        id: SkillId::new("iron-hide"),
        name: "Iron Hide".into(),
        trigger: SkillTrigger::Simple {
            event: TriggerEvent::StartRound,
        },
        probability: None,
        usage: UsageLimit::Unlimited,
        effects: vec![EffectTemplate {
            name: "iron-hide".into(),
            stat: StatKind::ArmorClass,
            value: EffectValue::Flat(1),
            duration: Some(1),
            max_triggers: 0,
            magnitude_from_roll: false,
        }],
    });

    let mut engine = BattleEngine::new(&mut state);
    engine.advance_turn().unwrap();
    engine.advance_turn().unwrap(); // wrap fires StartRound

    assert_eq!(state.initiative[0].effects.len(), 1);
    assert_eq!(state.initiative[0].effective_ac(), 13);
}

#[test]
fn battle_end_verdicts() {
    let mut state = battle(vec![
        participant(1, Side::Ally, SourceKind::Character),
        participant(2, Side::Enemy, SourceKind::Unit),
    ]);

    {
        let engine = BattleEngine::new(&mut state);
        let verdict = engine.check_battle_end();
        assert!(!verdict.ended);
    }

    state.initiative[1].stats.condition = Condition::Dead;
    {
        let engine = BattleEngine::new(&mut state);
        let verdict = engine.check_battle_end();
        assert!(verdict.ended);
        assert_eq!(verdict.result, Some(BattleResult::Victory));
    }

    // Both sides down reads as defeat.
    state.initiative[0].stats.condition = Condition::Unconscious;
    let engine = BattleEngine::new(&mut state);
    let verdict = engine.check_battle_end();
    assert_eq!(verdict.result, Some(BattleResult::Defeat));
}

#[test]
fn advance_requires_a_live_participant() {
    let mut state = battle(vec![
        participant(1, Side::Ally, SourceKind::Character),
        participant(2, Side::Enemy, SourceKind::Unit),
    ]);
    state.initiative[0].stats.condition = Condition::Unconscious;
    state.initiative[1].stats.condition = Condition::Dead;

    let mut engine = BattleEngine::new(&mut state);
    assert_eq!(
        engine.advance_turn().unwrap_err(),
        TurnError::NoActiveParticipants
    );
}
