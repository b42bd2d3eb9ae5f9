//! Trigger evaluation.
//!
//! Evaluation is a pure computation over the roster: it decides which of a
//! participant's skills fire for an event and converts their effect templates
//! into [`EffectDelta`]s. The single side effect is bumping the owner's
//! per-battle usage counters for skills that fired.

use crate::state::{EffectDelta, EffectValue, Participant, SkillId, StatKind};

use super::{Comparison, SkillTrigger, TriggerEvent, TriggerTarget, ValueKind};

/// Caller-supplied random draws for probability-gated skills, consumed in
/// skill order. A probability skill with no draw left does not fire.
#[derive(Debug)]
pub struct TriggerDraws<'a> {
    draws: &'a [u8],
    cursor: usize,
}

impl<'a> TriggerDraws<'a> {
    pub fn new(draws: &'a [u8]) -> Self {
        Self { draws, cursor: 0 }
    }

    /// An empty draw source; every probability skill stays silent.
    pub fn none() -> Self {
        Self {
            draws: &[],
            cursor: 0,
        }
    }

    fn next(&mut self) -> Option<u8> {
        let draw = self.draws.get(self.cursor).copied();
        if draw.is_some() {
            self.cursor += 1;
        }
        draw
    }
}

/// Skills that fired for one evaluation, plus their merged deltas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FiredTriggers {
    pub skills: Vec<SkillId>,
    pub deltas: Vec<EffectDelta>,
}

impl FiredTriggers {
    /// Sum of instant deltas on `stat` (the portion that folds into the
    /// current action rather than attaching).
    pub fn instant_total(&self, stat: StatKind) -> i32 {
        self.deltas
            .iter()
            .filter(|d| d.stat == stat && d.is_instant())
            .map(|d| d.value)
            .sum()
    }
}

/// Evaluates the owner's skills against `event` and returns what fired.
///
/// Simple triggers match by event name; complex triggers are re-checked
/// against live stats at every evaluation point, so a conditional modifier
/// keeps applying while its comparison holds. Usage limits and probability
/// draws gate both variants. Fired skills are recorded on the owner's
/// usage counters; participant stats are never touched here.
pub fn fire_triggers(
    roster: &mut [Participant],
    owner: usize,
    event: TriggerEvent,
    draws: &mut TriggerDraws<'_>,
) -> FiredTriggers {
    fire_filtered(roster, owner, draws, |skill, roster, owner| {
        match &skill.trigger {
            SkillTrigger::Simple { event: wanted } => *wanted == event,
            SkillTrigger::Complex {
                target,
                op,
                stat,
                value,
                value_kind,
            } => complex_holds(roster, owner, *target, *op, *stat, *value, *value_kind),
        }
    })
}

/// Fires exactly one named skill, bypassing event matching.
///
/// Used by the bonus-action skill resolver, which has already validated the
/// skill's trigger. Probability draws and usage limits still gate the fire.
pub fn fire_single(
    roster: &mut [Participant],
    owner: usize,
    skill_id: &SkillId,
    draws: &mut TriggerDraws<'_>,
) -> FiredTriggers {
    fire_filtered(roster, owner, draws, |skill, _, _| skill.id == *skill_id)
}

fn fire_filtered(
    roster: &mut [Participant],
    owner: usize,
    draws: &mut TriggerDraws<'_>,
    matches: impl Fn(&crate::trigger::ActiveSkill, &[Participant], usize) -> bool,
) -> FiredTriggers {
    let mut fired = FiredTriggers::default();

    {
        let owner_ref = &roster[owner];
        for skill in &owner_ref.skills {
            if !skill.usage.permits(owner_ref.skill_use_count(&skill.id)) {
                continue;
            }
            if !matches(skill, roster, owner) {
                continue;
            }

            if let Some(chance) = skill.probability {
                match draws.next() {
                    Some(draw) if draw <= chance => {}
                    _ => continue,
                }
            }

            fired.skills.push(skill.id.clone());
            for template in &skill.effects {
                fired.deltas.push(EffectDelta {
                    source: skill.id.0.clone(),
                    stat: template.stat,
                    value: template_value(owner_ref, template),
                    duration: template.duration,
                    max_triggers: template.max_triggers,
                });
            }
        }
    }

    for id in &fired.skills {
        roster[owner].record_skill_use(id);
    }
    fired
}

/// Numeric weight of a skill's effect template, resolved against the owner.
///
/// Percent values read against the stat's maximum where one exists (HP),
/// otherwise against the owner's base stat. Flag/Text templates carry no
/// numeric weight.
fn template_value(owner: &Participant, template: &crate::state::EffectTemplate) -> i32 {
    match &template.value {
        EffectValue::Flat(v) => *v,
        EffectValue::Percent(p) => {
            let base = match owner.stats.stat_maximum(template.stat) {
                Some(max) => max as i32,
                None => owner.stats.base_stat(template.stat),
            };
            base * p / 100
        }
        EffectValue::Flag(_) | EffectValue::Text(_) => 0,
    }
}

/// Whether a complex comparison currently holds.
///
/// Ally/Enemy fire when any active participant of that class (relative to
/// the owner's side) satisfies the comparison; downed participants are not
/// inspected.
fn complex_holds(
    roster: &[Participant],
    owner: usize,
    target: TriggerTarget,
    op: Comparison,
    stat: StatKind,
    value: i32,
    value_kind: ValueKind,
) -> bool {
    let owner_side = roster[owner].side;
    let satisfies = |p: &Participant| {
        let lhs = match value_kind {
            ValueKind::Number => p.effective_stat(stat),
            ValueKind::Percent => match p.stats.stat_maximum(stat) {
                Some(max) if max > 0 => p.stats.base_stat(stat) * 100 / max as i32,
                _ => p.effective_stat(stat),
            },
        };
        op.holds(lhs, value)
    };

    match target {
        TriggerTarget::Itself => satisfies(&roster[owner]),
        TriggerTarget::Ally => roster
            .iter()
            .filter(|p| p.is_active() && p.side == owner_side)
            .any(satisfies),
        TriggerTarget::Enemy => roster
            .iter()
            .filter(|p| p.is_active() && p.side != owner_side)
            .any(satisfies),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        CombatStats, EffectTemplate, Participant, ParticipantId, Side, SourceKind,
    };
    use crate::trigger::{ActiveSkill, UsageLimit};

    fn skill(id: &str, trigger: SkillTrigger) -> ActiveSkill {
        ActiveSkill {
            id: SkillId::new(id),
            name: id.to_string(),
            trigger,
            probability: None,
            usage: UsageLimit::Unlimited,
            effects: vec![EffectTemplate {
                name: id.to_string(),
                stat: StatKind::Attack,
                value: EffectValue::Flat(2),
                duration: Some(0),
                max_triggers: 0,
                magnitude_from_roll: false,
            }],
        }
    }

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
                CombatStats::new(10, 11),
            ),
        ]
    }

    #[test]
    fn simple_trigger_matches_event_name() {
        let mut roster = roster();
        roster[0].skills.push(skill(
            "rage",
            SkillTrigger::Simple {
                event: TriggerEvent::BeforeOwnerAttack,
            },
        ));

        let fired = fire_triggers(
            &mut roster,
            0,
            TriggerEvent::BeforeOwnerAttack,
            &mut TriggerDraws::none(),
        );
        assert_eq!(fired.skills.len(), 1);
        assert_eq!(fired.instant_total(StatKind::Attack), 2);

        let fired = fire_triggers(
            &mut roster,
            0,
            TriggerEvent::StartRound,
            &mut TriggerDraws::none(),
        );
        assert!(fired.skills.is_empty());
    }

    #[test]
    fn usage_limit_caps_firing() {
        let mut roster = roster();
        let mut once = skill(
            "second-wind",
            SkillTrigger::Simple {
                event: TriggerEvent::StartRound,
            },
        );
        once.usage = UsageLimit::OncePerBattle;
        roster[0].skills.push(once);

        let first = fire_triggers(
            &mut roster,
            0,
            TriggerEvent::StartRound,
            &mut TriggerDraws::none(),
        );
        assert_eq!(first.skills.len(), 1);

        let second = fire_triggers(
            &mut roster,
            0,
            TriggerEvent::StartRound,
            &mut TriggerDraws::none(),
        );
        assert!(second.skills.is_empty());
    }

    #[test]
    fn probability_gate_consumes_draws() {
        let mut roster = roster();
        let mut lucky = skill(
            "lucky-strike",
            SkillTrigger::Simple {
                event: TriggerEvent::BeforeOwnerAttack,
            },
        );
        lucky.probability = Some(50);
        roster[0].skills.push(lucky);

        // Draw over the chance: no fire.
        let fired = fire_triggers(
            &mut roster,
            0,
            TriggerEvent::BeforeOwnerAttack,
            &mut TriggerDraws::new(&[80]),
        );
        assert!(fired.skills.is_empty());

        // Draw under the chance: fires.
        let fired = fire_triggers(
            &mut roster,
            0,
            TriggerEvent::BeforeOwnerAttack,
            &mut TriggerDraws::new(&[30]),
        );
        assert_eq!(fired.skills.len(), 1);

        // No draw supplied: stays silent.
        let fired = fire_triggers(
            &mut roster,
            0,
            TriggerEvent::BeforeOwnerAttack,
            &mut TriggerDraws::none(),
        );
        assert!(fired.skills.is_empty());
    }

    #[test]
    fn complex_trigger_reads_live_percent_hp() {
        let mut roster = roster();
        roster[0].skills.push(skill(
            "executioner",
            SkillTrigger::Complex {
                target: TriggerTarget::Enemy,
                op: Comparison::Lt,
                stat: StatKind::Hp,
                value: 50,
                value_kind: ValueKind::Percent,
            },
        ));

        // Enemy at full HP: 100% is not < 50%.
        let fired = fire_triggers(
            &mut roster,
            0,
            TriggerEvent::BeforeOwnerAttack,
            &mut TriggerDraws::none(),
        );
        assert!(fired.skills.is_empty());

        roster[1].stats.hp.current = 4; // 40%
        let fired = fire_triggers(
            &mut roster,
            0,
            TriggerEvent::BeforeOwnerAttack,
            &mut TriggerDraws::none(),
        );
        assert_eq!(fired.skills.len(), 1);
    }

    #[test]
    fn evaluation_never_mutates_stats() {
        let mut roster = roster();
        roster[0].skills.push(skill(
            "rage",
            SkillTrigger::Simple {
                event: TriggerEvent::BeforeOwnerAttack,
            },
        ));
        let stats_before = roster[0].stats.clone();
        let enemy_before = roster[1].clone();

        fire_triggers(
            &mut roster,
            0,
            TriggerEvent::BeforeOwnerAttack,
            &mut TriggerDraws::none(),
        );

        assert_eq!(roster[0].stats, stats_before);
        assert_eq!(roster[1], enemy_before);
        // The usage counter is the one permitted side effect.
        assert_eq!(roster[0].skill_use_count(&SkillId::new("rage")), 1);
    }
}
