//! Bonus-action skill use.
//!
//! A participant may spend its bonus action to fire one of its skills whose
//! trigger is the `BonusAction` event. The bonus action is consumed even when
//! a probability-gated skill fails its draw — the attempt is the spend.

use crate::env::BattleEnv;
use crate::state::{ActionCost, BattleState, ParticipantId, SkillId, SkillReport};
use crate::trigger::{SkillTrigger, TriggerDraws, TriggerEvent, fire_single};

use super::ActionTransition;
use super::error::SkillError;

/// One bonus-action skill activation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseSkillAction {
    pub owner: ParticipantId,
    pub skill: SkillId,

    /// Random draw for a probability-gated skill.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trigger_draw: Option<u8>,
}

impl ActionTransition for UseSkillAction {
    type Error = SkillError;
    type Report = SkillReport;

    fn actor(&self) -> ParticipantId {
        self.owner
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), SkillError> {
        let owner = state
            .participant(self.owner)
            .ok_or(SkillError::OwnerNotFound(self.owner))?;
        if !owner.is_active() {
            return Err(SkillError::OwnerNotActive(self.owner));
        }

        let skill = owner
            .skills
            .iter()
            .find(|s| s.id == self.skill)
            .ok_or_else(|| SkillError::SkillNotFound(self.skill.clone()))?;

        if !matches!(
            skill.trigger,
            SkillTrigger::Simple {
                event: TriggerEvent::BonusAction
            }
        ) {
            return Err(SkillError::NotBonusAction(self.skill.clone()));
        }
        if !skill.usage.permits(owner.skill_use_count(&self.skill)) {
            return Err(SkillError::UsageExhausted(self.skill.clone()));
        }
        if owner.flags.has_spent(ActionCost::BonusAction) {
            return Err(SkillError::BonusActionSpent);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        _env: &BattleEnv<'_>,
    ) -> Result<SkillReport, SkillError> {
        let owner_idx = state
            .index_of(self.owner)
            .ok_or(SkillError::OwnerNotFound(self.owner))?;

        let draw_buf = self.trigger_draw.map(|d| [d]);
        let mut draws = match &draw_buf {
            Some(buf) => TriggerDraws::new(buf),
            None => TriggerDraws::none(),
        };

        let fired = fire_single(&mut state.initiative, owner_idx, &self.skill, &mut draws);
        super::absorb_deltas(&mut state.initiative, owner_idx, &fired);

        let owner = &mut state.initiative[owner_idx];
        owner.flags.spend(ActionCost::BonusAction);

        Ok(SkillReport {
            owner: self.owner,
            skill: self.skill.clone(),
            deltas: fired.deltas,
            hp_after: owner.stats.hp.current,
        })
    }
}
