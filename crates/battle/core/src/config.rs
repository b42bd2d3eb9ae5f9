/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Hard cap on roster size accepted at battle creation.
    pub max_participants: usize,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of timed effects attached to one participant.
    pub const MAX_ACTIVE_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_PARTICIPANTS: usize = 32;

    pub fn new() -> Self {
        Self {
            max_participants: Self::DEFAULT_MAX_PARTICIPANTS,
        }
    }

    pub fn with_max_participants(max_participants: usize) -> Self {
        Self { max_participants }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
