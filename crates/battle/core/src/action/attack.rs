//! Weapon/natural attack resolution.

use crate::combat::{DamageApplied, apply_damage, check_hit, resolve_attack_roll};
use crate::dice::D20;
use crate::env::BattleEnv;
use crate::state::{AttackReport, BattleState, ParticipantId, StatKind};
use crate::trigger::{TriggerDraws, TriggerEvent, fire_triggers};

use super::ActionTransition;
use super::error::AttackError;

/// One attack against one target, with every die pre-rolled by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub attacker: ParticipantId,
    pub target: ParticipantId,

    /// Name of the attack profile on the attacker.
    pub attack: String,

    pub attack_roll: u8,
    pub advantage_roll: Option<u8>,
    pub damage_rolls: Vec<u32>,

    /// Random draws for probability-gated skills, consumed in skill order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trigger_draws: Vec<u8>,
}

impl ActionTransition for AttackAction {
    type Error = AttackError;
    type Report = AttackReport;

    fn actor(&self) -> ParticipantId {
        self.attacker
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), AttackError> {
        let attacker = state
            .participant(self.attacker)
            .ok_or(AttackError::AttackerNotFound(self.attacker))?;
        if !attacker.is_active() {
            return Err(AttackError::AttackerNotActive(self.attacker));
        }

        let profile = attacker
            .attack_profile(&self.attack)
            .ok_or_else(|| AttackError::ProfileNotFound(self.attack.clone()))?;
        if attacker.flags.has_spent(profile.cost) {
            return Err(AttackError::SlotSpent(profile.cost));
        }

        state
            .participant(self.target)
            .ok_or(AttackError::TargetNotFound(self.target))?;

        D20::new(self.attack_roll)?;
        if let Some(advantage) = self.advantage_roll {
            D20::new(advantage)?;
        }
        profile.damage.validate(&self.damage_rolls)?;
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        _env: &BattleEnv<'_>,
    ) -> Result<AttackReport, AttackError> {
        let attacker_idx = state
            .index_of(self.attacker)
            .ok_or(AttackError::AttackerNotFound(self.attacker))?;
        let target_idx = state
            .index_of(self.target)
            .ok_or(AttackError::TargetNotFound(self.target))?;

        let profile = state.initiative[attacker_idx]
            .attack_profile(&self.attack)
            .ok_or_else(|| AttackError::ProfileNotFound(self.attack.clone()))?
            .clone();

        let roll = D20::new(self.attack_roll)?;
        let advantage_roll = self.advantage_roll.map(D20::new).transpose()?;
        let has_advantage = state.initiative[attacker_idx].has_advantage(profile.kind);

        let resolved = resolve_attack_roll(roll, advantage_roll, has_advantage);
        let target_ac = state.initiative[target_idx].effective_ac();
        let outcome = check_hit(resolved, profile.attack_bonus, target_ac);

        // Modifier order: passive traits shaped the roll above; skill
        // triggers fold in next; base dice come last.
        let mut draws = TriggerDraws::new(&self.trigger_draws);
        let before = fire_triggers(
            &mut state.initiative,
            attacker_idx,
            TriggerEvent::BeforeOwnerAttack,
            &mut draws,
        );
        let after = if outcome.is_hit() {
            fire_triggers(
                &mut state.initiative,
                attacker_idx,
                TriggerEvent::AfterOwnerAttack,
                &mut draws,
            )
        } else {
            Default::default()
        };

        let damage = if outcome.is_hit() {
            let base = profile.damage.total(&self.damage_rolls) as i64;
            let modifiers = before.instant_total(StatKind::Attack) as i64
                + after.instant_total(StatKind::Attack) as i64;
            (base + modifiers).max(0) as u32
        } else {
            // Guaranteed-damage floor applies as-is, no modifiers.
            profile.miss_floor.unwrap_or(0)
        };

        super::absorb_deltas(&mut state.initiative, attacker_idx, &before);
        super::absorb_deltas(&mut state.initiative, attacker_idx, &after);

        let target = &mut state.initiative[target_idx];
        let applied = if damage > 0 {
            apply_damage(&mut target.stats, target.source, damage)
        } else {
            DamageApplied {
                absorbed: 0,
                dealt: 0,
                hp_after: target.stats.hp.current,
                condition_after: target.stats.condition,
            }
        };

        state.initiative[attacker_idx].flags.spend(profile.cost);

        let mut fired_skills = before.skills;
        fired_skills.extend(after.skills);

        Ok(AttackReport {
            attacker: self.attacker,
            target: self.target,
            attack: profile.name,
            roll: roll.value(),
            advantage_roll: advantage_roll.map(D20::value),
            advantage_applied: has_advantage && advantage_roll.is_some(),
            resolved_roll: resolved.value(),
            attack_bonus: profile.attack_bonus,
            target_ac,
            outcome,
            damage,
            target_hp_after: applied.hp_after,
            target_condition: applied.condition_after,
            fired_skills,
        })
    }

    fn post_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), AttackError> {
        if super::hp_in_bounds(state) {
            Ok(())
        } else {
            Err(AttackError::HpInvariantViolated)
        }
    }
}
