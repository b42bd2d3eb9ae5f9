//! Caller-supplied dice values.
//!
//! The engine never generates randomness. Every roll enters as a plain number
//! rolled by the table (physical dice or the app's roller) and is validated
//! here before resolution touches any state. Tests are deterministic by
//! construction.

/// Errors raised while validating supplied dice values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiceError {
    #[error("d20 roll {0} is outside 1..=20")]
    RollOutOfRange(u8),

    #[error("expected {expected} damage dice, {supplied} supplied")]
    DieCountMismatch { expected: u32, supplied: usize },

    #[error("die result {value} is outside 1..={faces}")]
    DieOutOfRange { value: u32, faces: u32 },
}

/// A validated d20 result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct D20(u8);

impl D20 {
    /// Wraps a raw roll, rejecting values outside 1..=20.
    pub fn new(roll: u8) -> Result<Self, DiceError> {
        if (1..=20).contains(&roll) {
            Ok(Self(roll))
        } else {
            Err(DiceError::RollOutOfRange(roll))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// A natural 20 hits regardless of modifiers.
    pub const fn is_natural_20(self) -> bool {
        self.0 == 20
    }

    /// A natural 1 misses regardless of modifiers.
    pub const fn is_natural_1(self) -> bool {
        self.0 == 1
    }
}

/// A dice expression such as `2d6+1`: count, faces, and a static modifier.
///
/// The expression is never rolled by the engine; it describes the shape the
/// caller's supplied results must have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceExpr {
    pub count: u32,
    pub faces: u32,
    pub modifier: i32,
}

impl DiceExpr {
    pub const fn new(count: u32, faces: u32, modifier: i32) -> Self {
        Self {
            count,
            faces,
            modifier,
        }
    }

    /// Checks supplied die results against this expression's shape.
    pub fn validate(&self, results: &[u32]) -> Result<(), DiceError> {
        if results.len() != self.count as usize {
            return Err(DiceError::DieCountMismatch {
                expected: self.count,
                supplied: results.len(),
            });
        }
        for &value in results {
            if value < 1 || value > self.faces {
                return Err(DiceError::DieOutOfRange {
                    value,
                    faces: self.faces,
                });
            }
        }
        Ok(())
    }

    /// Sums validated die results with the static modifier, floored at zero.
    pub fn total(&self, results: &[u32]) -> u32 {
        let sum: i64 = results.iter().map(|&v| v as i64).sum::<i64>() + self.modifier as i64;
        sum.max(0) as u32
    }
}

impl core::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.modifier {
            0 => write!(f, "{}d{}", self.count, self.faces),
            m if m > 0 => write!(f, "{}d{}+{}", self.count, self.faces, m),
            m => write!(f, "{}d{}{}", self.count, self.faces, m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn d20_accepts_bounds_and_rejects_outside() {
        assert!(D20::new(1).is_ok());
        assert!(D20::new(20).is_ok());
        assert_eq!(D20::new(0), Err(DiceError::RollOutOfRange(0)));
        assert_eq!(D20::new(21), Err(DiceError::RollOutOfRange(21)));
    }

    #[test]
    fn naturals() {
        assert!(D20::new(20).unwrap().is_natural_20());
        assert!(D20::new(1).unwrap().is_natural_1());
        assert!(!D20::new(19).unwrap().is_natural_20());
    }

    #[test]
    fn expr_validates_count_and_range() {
        let expr = DiceExpr::new(2, 6, 1);
        assert!(expr.validate(&[4, 3]).is_ok());
        assert_eq!(
            expr.validate(&[4]),
            Err(DiceError::DieCountMismatch {
                expected: 2,
                supplied: 1
            })
        );
        assert_eq!(
            expr.validate(&[4, 7]),
            Err(DiceError::DieOutOfRange { value: 7, faces: 6 })
        );
    }

    #[test]
    fn total_applies_modifier_and_floors_at_zero() {
        assert_eq!(DiceExpr::new(2, 6, 1).total(&[4, 3]), 8);
        assert_eq!(DiceExpr::new(1, 4, -10).total(&[2]), 0);
    }

    #[test]
    fn display_formats() {
        assert_eq!(DiceExpr::new(2, 6, 0).to_string(), "2d6");
        assert_eq!(DiceExpr::new(1, 8, 3).to_string(), "1d8+3");
        assert_eq!(DiceExpr::new(1, 8, -2).to_string(), "1d8-2");
    }
}
