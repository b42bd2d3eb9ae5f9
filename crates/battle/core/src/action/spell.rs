//! Spell cast resolution.
//!
//! One cast may touch many targets; each supplied target id gets its own
//! report entry even when the spell ends up doing nothing to it. Partial
//! AOE outcomes (some targets save, some do not) are recorded individually.

use std::collections::BTreeMap;

use crate::combat::{apply_damage, apply_heal, resolve_save, save_adjusted};
use crate::dice::D20;
use crate::env::{BattleEnv, SpellDefinition, SpellKind, SpellTargeting};
use crate::state::{
    AppliedValue, BattleState, HitCheckReport, ParticipantId, SaveReport, SpellId, SpellReport,
    StatKind, TargetReport,
};
use crate::trigger::{TriggerDraws, TriggerEvent, fire_triggers};

use super::ActionTransition;
use super::error::SpellError;

/// A saving-throw result supplied for one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavingThrowRoll {
    pub participant: ParticipantId,
    pub roll: u8,
}

/// One spell cast, with every die pre-rolled by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastSpellAction {
    pub caster: ParticipantId,
    pub spell: SpellId,
    pub targets: Vec<ParticipantId>,
    pub damage_rolls: Vec<u32>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub saving_throws: Vec<SavingThrowRoll>,

    /// Result feeding spells whose attached effect takes its magnitude from
    /// a secondary roll.
    #[cfg_attr(feature = "serde", serde(default))]
    pub additional_roll: Option<u32>,

    /// Single d20 for spells that define a hit check.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hit_roll: Option<u8>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub trigger_draws: Vec<u8>,
}

impl CastSpellAction {
    /// The ids the cast will touch: `NoTarget` spells apply to the caster.
    fn resolved_targets(&self, targeting: SpellTargeting) -> Vec<ParticipantId> {
        match targeting {
            SpellTargeting::NoTarget => vec![self.caster],
            SpellTargeting::Target | SpellTargeting::Aoe => self.targets.clone(),
        }
    }
}

impl ActionTransition for CastSpellAction {
    type Error = SpellError;
    type Report = SpellReport;

    fn actor(&self) -> ParticipantId {
        self.caster
    }

    fn pre_validate(&self, state: &BattleState, env: &BattleEnv<'_>) -> Result<(), SpellError> {
        let caster = state
            .participant(self.caster)
            .ok_or(SpellError::CasterNotFound(self.caster))?;
        if !caster.is_active() {
            return Err(SpellError::CasterNotActive(self.caster));
        }

        let def = env
            .spells()?
            .spell(&self.spell)
            .ok_or_else(|| SpellError::SpellNotFound(self.spell.clone()))?;

        if !caster.spellcasting.knows(&self.spell) {
            return Err(SpellError::SpellNotKnown(self.spell.clone()));
        }
        // Slot exhaustion rejects here, before any effect is computed.
        if !caster.spellcasting.slot_available(def.level) {
            return Err(SpellError::NoSlotAvailable(def.level));
        }
        if caster.flags.has_spent(def.cost) {
            return Err(SpellError::SlotSpent(def.cost));
        }

        if matches!(
            def.targeting,
            SpellTargeting::Target | SpellTargeting::Aoe
        ) && self.targets.is_empty()
        {
            return Err(SpellError::EmptyTargets);
        }

        def.dice.validate(&self.damage_rolls)?;
        for save in &self.saving_throws {
            D20::new(save.roll)?;
        }
        if def.hit_check.is_some() {
            D20::new(self.hit_roll.ok_or(SpellError::MissingHitRoll)?)?;
        }

        // Every live supplied target needs a save roll when the spell
        // declares one; skipped targets (unknown or down) do not.
        if def.saving_throw.is_some() {
            let supplied: BTreeMap<ParticipantId, u8> = self
                .saving_throws
                .iter()
                .map(|s| (s.participant, s.roll))
                .collect();
            for id in self.resolved_targets(def.targeting) {
                let live = state.participant(id).is_some_and(|p| p.is_active());
                if live && !supplied.contains_key(&id) {
                    return Err(SpellError::MissingSavingThrow(id));
                }
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<SpellReport, SpellError> {
        let caster_idx = state
            .index_of(self.caster)
            .ok_or(SpellError::CasterNotFound(self.caster))?;
        let def: SpellDefinition = env
            .spells()?
            .spell(&self.spell)
            .ok_or_else(|| SpellError::SpellNotFound(self.spell.clone()))?
            .clone();
        let caster_side = state.initiative[caster_idx].side;

        let mut draws = TriggerDraws::new(&self.trigger_draws);
        let before = fire_triggers(
            &mut state.initiative,
            caster_idx,
            TriggerEvent::BeforeCast,
            &mut draws,
        );

        // Modifier order: skill triggers fold into the base dice total.
        let base = {
            let dice_total = def.dice.total(&self.damage_rolls) as i64;
            (dice_total + before.instant_total(StatKind::Attack) as i64).max(0) as u32
        };

        let hit_check = match &def.hit_check {
            Some(hc) => {
                let roll = D20::new(self.hit_roll.ok_or(SpellError::MissingHitRoll)?)?;
                Some(HitCheckReport {
                    roll: roll.value(),
                    dc: hc.dc,
                    success: roll.value() as i32 >= hc.dc,
                })
            }
            None => None,
        };

        let saves: BTreeMap<ParticipantId, u8> = self
            .saving_throws
            .iter()
            .map(|s| (s.participant, s.roll))
            .collect();

        let mut targets = Vec::new();
        for id in self.resolved_targets(def.targeting) {
            targets.push(resolve_target(
                state, &def, id, caster_side, base, hit_check, &saves, self.additional_roll,
            )?);
        }

        let after = fire_triggers(
            &mut state.initiative,
            caster_idx,
            TriggerEvent::AfterCast,
            &mut draws,
        );
        super::absorb_deltas(&mut state.initiative, caster_idx, &before);
        super::absorb_deltas(&mut state.initiative, caster_idx, &after);

        let caster = &mut state.initiative[caster_idx];
        caster.spellcasting.consume_slot(def.level);
        caster.flags.spend(def.cost);

        let mut fired_skills = before.skills;
        fired_skills.extend(after.skills);

        Ok(SpellReport {
            caster: self.caster,
            spell: self.spell.clone(),
            level: def.level,
            slot_consumed: def.level > 0,
            hit_check,
            targets,
            fired_skills,
        })
    }

    fn post_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), SpellError> {
        if super::hp_in_bounds(state) {
            Ok(())
        } else {
            Err(SpellError::HpInvariantViolated)
        }
    }
}

/// What the spell does to one target class.
enum TargetOp {
    Damage,
    Heal,
}

/// Resolves the spell's effect on one supplied target id.
///
/// Unknown and downed ids are skipped but still reported; out-of-scope
/// targets record NoEffect. The hit check gates everything; the saving
/// throw then halves or negates per its policy.
#[allow(clippy::too_many_arguments)]
fn resolve_target(
    state: &mut BattleState,
    def: &SpellDefinition,
    id: ParticipantId,
    caster_side: crate::state::Side,
    base: u32,
    hit_check: Option<HitCheckReport>,
    saves: &BTreeMap<ParticipantId, u8>,
    additional_roll: Option<u32>,
) -> Result<TargetReport, SpellError> {
    let skipped = TargetReport {
        target: id,
        save: None,
        applied: AppliedValue::NoEffect,
        hp_after: None,
        condition_after: None,
        effect_attached: None,
    };

    let Some(idx) = state.index_of(id) else {
        return Ok(skipped);
    };
    if !state.initiative[idx].is_active() {
        return Ok(skipped);
    }

    let is_ally = state.initiative[idx].side == caster_side;
    let op = match def.kind {
        SpellKind::Damage if covered(def, is_ally) => TargetOp::Damage,
        SpellKind::Heal if covered(def, is_ally) => TargetOp::Heal,
        SpellKind::Mixed if is_ally && def.scope.covers_ally() => TargetOp::Heal,
        SpellKind::Mixed if !is_ally && def.scope.covers_enemy() => TargetOp::Damage,
        _ => return Ok(skipped),
    };

    if let Some(check) = hit_check {
        if !check.success {
            return Ok(skipped);
        }
    }

    let mut magnitude = base;
    let save = match &def.saving_throw {
        Some(st) => {
            let roll = saves
                .get(&id)
                .copied()
                .ok_or(SpellError::MissingSavingThrow(id))?;
            let roll = D20::new(roll)?;
            let success = resolve_save(roll, st.dc);
            if success {
                magnitude = save_adjusted(magnitude, st.on_success);
            }
            Some(SaveReport {
                roll: roll.value(),
                dc: st.dc,
                success,
                policy: st.on_success,
            })
        }
        None => None,
    };

    // A save under the negate policy leaves the target untouched, rider
    // included; the save result itself is still recorded.
    if save.is_some_and(|s| s.success && matches!(s.policy, crate::combat::SavePolicy::None)) {
        return Ok(TargetReport { save, ..skipped });
    }

    let target = &mut state.initiative[idx];
    let applied = match op {
        TargetOp::Damage => {
            let d = apply_damage(&mut target.stats, target.source, magnitude);
            AppliedValue::Damage {
                planned: magnitude,
                actual: d.absorbed + d.dealt,
            }
        }
        TargetOp::Heal => {
            let h = apply_heal(&mut target.stats, magnitude);
            AppliedValue::Healing {
                planned: magnitude,
                actual: h.healed,
            }
        }
    };

    let effect_attached = def.effect.as_ref().and_then(|template| {
        if template.is_timed() {
            let effect = template.instantiate(additional_roll);
            let name = effect.name.clone();
            target.add_effect(effect);
            Some(name)
        } else {
            None
        }
    });

    Ok(TargetReport {
        target: id,
        save,
        applied,
        hp_after: Some(target.stats.hp.current),
        condition_after: Some(target.stats.condition),
        effect_attached,
    })
}

/// Whether the spell's scope covers a target with this side relation.
fn covered(def: &SpellDefinition, is_ally: bool) -> bool {
    if is_ally {
        def.scope.covers_ally()
    } else {
        def.scope.covers_enemy()
    }
}
