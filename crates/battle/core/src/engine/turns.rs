//! Turn and initiative state machine.
//!
//! The cursor walks the fixed initiative order, skipping participants that
//! cannot act. A wrap past the last slot is the round tick: end-of-round
//! triggers fire, timed effects apply and expire, the round increments, and
//! start-of-round triggers fire — all in roster order.

use crate::action::absorb_deltas;
use crate::state::{BattlePhase, EffectValue, Participant, ParticipantId, Side, StatKind};
use crate::trigger::{TriggerDraws, TriggerEvent, fire_triggers};

use super::BattleEngine;
use super::errors::TurnError;

/// Result of one `advance_turn` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnAdvance {
    pub round: u32,
    pub turn_index: usize,
    pub current: ParticipantId,
    /// True when this advance crossed the end of the initiative order.
    pub wrapped: bool,
}

/// Battle-end query result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleVerdict {
    pub ended: bool,
    pub result: Option<BattleResult>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleResult {
    Victory,
    Defeat,
}

/// Turn scheduling methods for BattleEngine.
impl BattleEngine<'_> {
    /// Advances the cursor to the next participant able to act.
    ///
    /// Skipped participants consume no turns; a wrap increments the round
    /// exactly once regardless of how many downed slots the cursor crossed.
    /// The new current participant's action flags are reset.
    pub fn advance_turn(&mut self) -> Result<TurnAdvance, TurnError> {
        if !self.state.is_active() {
            return Err(TurnError::BattleNotActive {
                phase: self.state.phase,
            });
        }
        if !self.state.initiative.iter().any(Participant::is_active) {
            return Err(TurnError::NoActiveParticipants);
        }

        let len = self.state.initiative.len();
        let mut wrapped = false;
        loop {
            self.state.turn_index += 1;
            if self.state.turn_index >= len {
                self.state.turn_index = 0;
                self.round_tick();
                wrapped = true;
            }
            if self.state.initiative[self.state.turn_index].is_active() {
                break;
            }
        }

        let current = &mut self.state.initiative[self.state.turn_index];
        current.flags.reset();

        Ok(TurnAdvance {
            round: self.state.round,
            turn_index: self.state.turn_index,
            current: current.id,
            wrapped,
        })
    }

    /// Reports whether one side is fully down.
    ///
    /// The request layer calls this after each resolution and marks the
    /// battle completed. Defeat is checked first: if both sides are down in
    /// the same resolution, the allies' fall decides it.
    pub fn check_battle_end(&self) -> BattleVerdict {
        if self.state.side_down(Side::Ally) {
            return BattleVerdict {
                ended: true,
                result: Some(BattleResult::Defeat),
            };
        }
        if self.state.side_down(Side::Enemy) {
            return BattleVerdict {
                ended: true,
                result: Some(BattleResult::Victory),
            };
        }
        BattleVerdict {
            ended: false,
            result: None,
        }
    }

    /// Marks the battle completed. No further resolution is accepted.
    pub fn complete(&mut self) {
        self.state.phase = BattlePhase::Completed;
    }

    /// The round boundary: end-round triggers, effect upkeep, round
    /// increment, start-round triggers.
    ///
    /// Round events carry no probability draws, so probability-gated skills
    /// stay silent here.
    fn round_tick(&mut self) {
        let len = self.state.initiative.len();

        for i in 0..len {
            let fired = fire_triggers(
                &mut self.state.initiative,
                i,
                TriggerEvent::EndRound,
                &mut TriggerDraws::none(),
            );
            absorb_deltas(&mut self.state.initiative, i, &fired);
        }

        for participant in &mut self.state.initiative {
            tick_effects(participant);
        }

        self.state.round += 1;

        for i in 0..len {
            let fired = fire_triggers(
                &mut self.state.initiative,
                i,
                TriggerEvent::StartRound,
                &mut TriggerDraws::none(),
            );
            absorb_deltas(&mut self.state.initiative, i, &fired);
        }
    }
}

/// Applies one round of upkeep to a participant's timed effects.
///
/// Periodic HP effects re-apply (within their trigger cap), finite durations
/// count down, and expired effects drop off.
fn tick_effects(participant: &mut Participant) {
    let mut hp_delta: i64 = 0;
    for effect in participant.effects.iter_mut() {
        if effect.stat == StatKind::Hp && effect.can_trigger() {
            let amount = match &effect.value {
                EffectValue::Flat(v) => *v as i64,
                EffectValue::Percent(p) => {
                    participant.stats.hp.max as i64 * *p as i64 / 100
                }
                EffectValue::Flag(_) | EffectValue::Text(_) => 0,
            };
            if amount != 0 {
                effect.times_triggered += 1;
                hp_delta += amount;
            }
        }
    }

    if hp_delta > 0 {
        crate::combat::apply_heal(&mut participant.stats, hp_delta.min(u32::MAX as i64) as u32);
    } else if hp_delta < 0 {
        crate::combat::apply_damage(
            &mut participant.stats,
            participant.source,
            (-hp_delta).min(u32::MAX as i64) as u32,
        );
    }

    for effect in participant.effects.iter_mut() {
        if let Some(duration) = effect.duration.as_mut() {
            *duration = duration.saturating_sub(1);
        }
    }
    participant.effects.retain(|e| e.duration != Some(0));
}
