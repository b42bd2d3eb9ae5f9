//! Attack-roll resolution.

use crate::dice::D20;

use super::result::HitOutcome;

/// Picks the roll an attack actually uses.
///
/// With advantage and a supplied second roll, the higher of the two counts;
/// otherwise the primary roll stands as supplied.
pub fn resolve_attack_roll(roll: D20, advantage_roll: Option<D20>, has_advantage: bool) -> D20 {
    match (has_advantage, advantage_roll) {
        (true, Some(second)) => roll.max(second),
        _ => roll,
    }
}

/// Compares the resolved roll against the target's armor class.
///
/// A natural 20 always hits and a natural 1 always misses, regardless of the
/// modified total.
pub fn check_hit(resolved: D20, attack_bonus: i32, armor_class: i32) -> HitOutcome {
    if resolved.is_natural_20() {
        return HitOutcome::CriticalHit;
    }
    if resolved.is_natural_1() {
        return HitOutcome::Miss;
    }
    if resolved.value() as i32 + attack_bonus >= armor_class {
        HitOutcome::Hit
    } else {
        HitOutcome::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: u8) -> D20 {
        D20::new(v).unwrap()
    }

    #[test]
    fn advantage_takes_higher_roll() {
        assert_eq!(resolve_attack_roll(d(8), Some(d(15)), true), d(15));
        assert_eq!(resolve_attack_roll(d(15), Some(d(8)), true), d(15));
    }

    #[test]
    fn no_advantage_uses_primary_roll() {
        assert_eq!(resolve_attack_roll(d(8), Some(d(15)), false), d(8));
        assert_eq!(resolve_attack_roll(d(8), None, true), d(8));
    }

    #[test]
    fn natural_20_always_hits() {
        // AC far beyond the modified total
        assert_eq!(check_hit(d(20), 0, 99), HitOutcome::CriticalHit);
    }

    #[test]
    fn natural_1_always_misses() {
        // Bonus alone would clear the AC
        assert_eq!(check_hit(d(1), 30, 10), HitOutcome::Miss);
    }

    #[test]
    fn modified_total_vs_ac() {
        assert_eq!(check_hit(d(12), 3, 15), HitOutcome::Hit);
        assert_eq!(check_hit(d(12), 2, 15), HitOutcome::Miss);
    }
}
