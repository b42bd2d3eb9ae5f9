//! Action execution pipeline and turn scheduling.
//!
//! The [`BattleEngine`] is the authoritative reducer for [`BattleState`]. It
//! drives every action through the three-phase transition pipeline and owns
//! the atomicity guarantee: a rejected request leaves roster, cursor, and log
//! bit-for-bit unchanged, and a successful one appends exactly one log entry
//! carrying the pre-action snapshot.

mod errors;
mod rollback;
mod turns;

pub use errors::{ExecuteError, RollbackError, TransitionPhase, TransitionPhaseError, TurnError};
pub use turns::{BattleResult, BattleVerdict, TurnAdvance};

use crate::action::{Action, ActionTransition};
use crate::env::BattleEnv;
use crate::state::{ActionOutcome, BattleAction, BattleState};

/// Battle engine that manages action execution, turn scheduling, and rollback.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
///
/// The engine assumes the caller serializes requests per battle (see the
/// runtime façade); its methods are plain transformations of
/// `(BattleState, request)` with no interior locking.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    /// Creates a new engine over the given state.
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    /// Read access to the underlying state.
    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Executes an action and appends its log entry.
    ///
    /// The snapshot captured before execution serves both purposes at once:
    /// it becomes the log entry's `state_before` on success and the restore
    /// point on failure, so no partially applied action is ever observable.
    pub fn execute(
        &mut self,
        env: &BattleEnv<'_>,
        action: &Action,
    ) -> Result<BattleAction, ExecuteError> {
        if !self.state.is_active() {
            return Err(ExecuteError::BattleNotActive {
                phase: self.state.phase,
            });
        }

        let snapshot = self.state.snapshot();

        let result = match action {
            Action::Attack(transition) => drive_transition(transition, self.state, env)
                .map(ActionOutcome::Attack)
                .map_err(ExecuteError::Attack),
            Action::CastSpell(transition) => drive_transition(transition, self.state, env)
                .map(ActionOutcome::Spell)
                .map_err(ExecuteError::Spell),
            Action::UseSkill(transition) => drive_transition(transition, self.state, env)
                .map(ActionOutcome::Skill)
                .map_err(ExecuteError::Skill),
        };

        match result {
            Ok(outcome) => Ok(self.state.log.append(outcome, snapshot).clone()),
            Err(error) => {
                self.state.restore(snapshot);
                Err(error)
            }
        }
    }
}

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the battle state and return the report
/// 3. `post_validate` - Verify invariants after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut BattleState,
    env: &BattleEnv<'_>,
) -> Result<T::Report, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let report = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(report)
}
