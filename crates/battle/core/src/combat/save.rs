//! Saving-throw resolution.

use crate::dice::D20;

/// What a successful save does to the effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SavePolicy {
    /// Half damage, rounded down.
    Half,
    /// No effect at all.
    None,
}

/// A save succeeds when the supplied roll meets or beats the DC.
///
/// The roll arrives with the target's modifiers already baked in by the
/// caller; the engine compares plain numbers.
pub fn resolve_save(roll: D20, dc: i32) -> bool {
    roll.value() as i32 >= dc
}

/// Amount that applies after a successful save under `policy`.
pub fn save_adjusted(full: u32, policy: SavePolicy) -> u32 {
    match policy {
        SavePolicy::Half => full / 2,
        SavePolicy::None => 0,
    }
}
