//! Rollback and reset.
//!
//! Rollback restores the roster/cursor triple from a prior log entry's
//! snapshot and truncates the log to that index. It is the sole undo
//! mechanism; there is no redo, and indices are never reused afterwards
//! because `action_index` is always assigned from the post-truncation
//! length.

use super::BattleEngine;
use super::errors::RollbackError;
use crate::state::BattlePhase;

/// Rollback methods for BattleEngine.
impl BattleEngine<'_> {
    /// Restores the state captured before log entry `action_index` and
    /// truncates the log to that entry's position.
    pub fn rollback_to(&mut self, action_index: usize) -> Result<(), RollbackError> {
        if !self.state.is_active() {
            return Err(RollbackError::BattleNotActive {
                phase: self.state.phase,
            });
        }
        let entry = self
            .state
            .log
            .get(action_index)
            .ok_or(RollbackError::IndexOutOfRange {
                requested: action_index,
                len: self.state.log.len(),
            })?;

        let snapshot = entry.state_before.clone();
        self.state.restore(snapshot);
        self.state.log.truncate(action_index);
        Ok(())
    }

    /// Full battle reset: restores the oldest snapshot and clears the log.
    ///
    /// This is the only operation that deletes log entries. A completed
    /// battle returns to the active phase, since its outcome no longer
    /// holds after the reset.
    pub fn reset_battle(&mut self) {
        if let Some(first) = self.state.log.get(0) {
            let snapshot = first.state_before.clone();
            self.state.restore(snapshot);
        }
        self.state.log.clear();
        if self.state.phase == BattlePhase::Completed {
            self.state.phase = BattlePhase::Active;
        }
    }
}
