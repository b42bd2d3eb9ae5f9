//! Action domain — the three resolvable combat actions.
//!
//! Every state mutation enters through an [`ActionTransition`]: a validated,
//! three-phase transformation of [`BattleState`]. Pre-validation does all
//! rejection checks before any mutation; apply performs the resolution and
//! produces the log payload; post-validation asserts invariants on the
//! mutated state. The engine drives the phases and guarantees atomicity.
//!
//! # Module Structure
//!
//! - `error`: per-action error types mapped onto the shared taxonomy
//! - `attack`: weapon/natural attack resolution
//! - `spell`: spell cast resolution (saves, hit checks, AOE)
//! - `skill`: bonus-action skill use

pub mod attack;
pub mod error;
pub mod skill;
pub mod spell;

pub use attack::AttackAction;
pub use error::{AttackError, SkillError, SpellError};
pub use skill::UseSkillAction;
pub use spell::{CastSpellAction, SavingThrowRoll};

use crate::combat::{apply_damage, apply_heal};
use crate::env::BattleEnv;
use crate::state::{BattleState, Participant, ParticipantId, StatKind};
use crate::trigger::FiredTriggers;

/// Defines how a concrete action variant mutates battle state.
///
/// Phases:
/// 1. `pre_validate` — every rejection check, against the state **before**
///    mutation; nothing may change here
/// 2. `apply` — mutate the roster and return the log payload
/// 3. `post_validate` — invariant checks against the state **after** mutation
pub trait ActionTransition {
    type Error;
    type Report;

    /// Returns the participant performing this action.
    fn actor(&self) -> ParticipantId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, state: &BattleState, env: &BattleEnv<'_>) -> Result<(), Self::Error>;

    /// Applies the action by mutating the battle state directly.
    fn apply(&self, state: &mut BattleState, env: &BattleEnv<'_>)
    -> Result<Self::Report, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Top-level action enum dispatched by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Attack(AttackAction),
    CastSpell(CastSpellAction),
    UseSkill(UseSkillAction),
}

impl Action {
    /// Returns the participant performing this action.
    pub fn actor(&self) -> ParticipantId {
        match self {
            Action::Attack(a) => a.actor(),
            Action::CastSpell(a) => a.actor(),
            Action::UseSkill(a) => a.actor(),
        }
    }
}

impl From<AttackAction> for Action {
    fn from(action: AttackAction) -> Self {
        Action::Attack(action)
    }
}

impl From<CastSpellAction> for Action {
    fn from(action: CastSpellAction) -> Self {
        Action::CastSpell(action)
    }
}

impl From<UseSkillAction> for Action {
    fn from(action: UseSkillAction) -> Self {
        Action::UseSkill(action)
    }
}

/// Folds fired trigger deltas into the roster.
///
/// Timed deltas attach to the owner as active effects. Instant HP deltas
/// apply to the owner immediately (positive heals, negative damages). Instant
/// deltas on other stats only make sense folded into the action that fired
/// them; the action resolvers read those via `FiredTriggers::instant_total`.
pub(crate) fn absorb_deltas(roster: &mut [Participant], owner: usize, fired: &FiredTriggers) {
    for delta in &fired.deltas {
        if delta.is_instant() {
            if delta.stat == StatKind::Hp && delta.value != 0 {
                let source = roster[owner].source;
                let stats = &mut roster[owner].stats;
                if delta.value > 0 {
                    apply_heal(stats, delta.value as u32);
                } else {
                    apply_damage(stats, source, delta.value.unsigned_abs());
                }
            }
        } else {
            roster[owner].add_effect(delta.to_effect());
        }
    }
}

/// Checks the HP clamp invariant across the whole roster.
pub(crate) fn hp_in_bounds(state: &BattleState) -> bool {
    state
        .initiative
        .iter()
        .all(|p| p.stats.hp.current <= p.stats.hp.max)
}
