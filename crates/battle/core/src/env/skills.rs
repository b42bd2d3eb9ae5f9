//! Skill catalog and unlock-state lookup.
//!
//! The skill-tree progression system lives outside the engine; the engine
//! only consumes its conclusions — which skills exist and which a given
//! participant currently has unlocked.

use crate::state::{ParticipantId, SkillId};
use crate::trigger::ActiveSkill;

/// Read-only skill catalog and unlock-state reader.
pub trait SkillOracle {
    /// Looks up a skill definition by id.
    fn skill(&self, id: &SkillId) -> Option<&ActiveSkill>;

    /// Skills a participant currently has unlocked, per external progression
    /// data. Used at battle setup to populate `Participant::skills`.
    fn unlocked(&self, participant: ParticipantId) -> Vec<SkillId>;
}
