//! Timed stat modifiers attached to participants.
//!
//! Effects come from spells and skill triggers. An effect either modifies an
//! effective stat for as long as it is attached (ArmorClass, Attack, Speed,
//! Morale) or re-applies to current HP at every round tick (Hp). Finite
//! durations count down once per round and the effect is dropped at zero.

use strum::Display;

/// The stats an effect or trigger comparison can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Hp,
    Attack,
    ArmorClass,
    Speed,
    Morale,
    Level,
}

/// The magnitude of an effect.
///
/// Flat and Percent are numeric modifiers. Flag and Text carry no numeric
/// weight; they mark conditions the table reads off the sheet (e.g. a
/// "blessed" marker) and the resolution math ignores them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectValue {
    Flat(i32),
    /// Percent of the stat's base (or of max HP for periodic Hp effects).
    Percent(i32),
    Flag(bool),
    Text(String),
}

impl EffectValue {
    /// Applies this value to a running stat total.
    ///
    /// Values apply in attachment order: flats add, percents scale the
    /// running value. Flag/Text leave the total untouched.
    pub fn modify(&self, base: i32) -> i32 {
        match self {
            EffectValue::Flat(v) => base + v,
            EffectValue::Percent(p) => base + base * p / 100,
            EffectValue::Flag(_) | EffectValue::Text(_) => base,
        }
    }
}

/// A timed modifier attached to one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub name: String,
    pub stat: StatKind,
    pub value: EffectValue,

    /// Rounds remaining. None means the effect lasts until battle end.
    pub duration: Option<u32>,

    /// Caps how many round ticks a periodic effect re-applies on. 0 = unlimited.
    pub max_triggers: u32,

    /// How many round ticks this effect has already applied on.
    pub times_triggered: u32,
}

impl ActiveEffect {
    /// True while a periodic effect may still re-apply at a round tick.
    pub fn can_trigger(&self) -> bool {
        self.max_triggers == 0 || self.times_triggered < self.max_triggers
    }
}

/// Declarative template for an effect, carried by spell and skill catalogs.
///
/// `duration: Some(0)` means the template resolves instantly (its value folds
/// into the current action) instead of attaching.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTemplate {
    pub name: String,
    pub stat: StatKind,
    pub value: EffectValue,
    pub duration: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_triggers: u32,

    /// When set, the template's magnitude is taken from the caller-supplied
    /// additional roll instead of `value`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub magnitude_from_roll: bool,
}

impl EffectTemplate {
    /// True when this template attaches a timed effect rather than folding
    /// into the current action.
    pub fn is_timed(&self) -> bool {
        !matches!(self.duration, Some(0))
    }

    /// Instantiates the attached effect, substituting the supplied roll for
    /// roll-driven magnitudes.
    pub fn instantiate(&self, additional_roll: Option<u32>) -> ActiveEffect {
        let value = match (self.magnitude_from_roll, additional_roll) {
            (true, Some(roll)) => EffectValue::Flat(roll as i32),
            _ => self.value.clone(),
        };
        ActiveEffect {
            name: self.name.clone(),
            stat: self.stat,
            value,
            duration: self.duration,
            max_triggers: self.max_triggers,
            times_triggered: 0,
        }
    }
}

/// A stat delta produced by the skill-trigger evaluator.
///
/// Deltas are data, not mutations: the resolution pipeline merges them in a
/// fixed order (passive traits, then skill triggers, then base dice). A delta
/// with `duration: Some(0)` folds into the current action; anything else
/// attaches as an [`ActiveEffect`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDelta {
    /// Skill that produced this delta.
    pub source: String,
    pub stat: StatKind,
    pub value: i32,
    pub duration: Option<u32>,
    pub max_triggers: u32,
}

impl EffectDelta {
    /// True when the delta folds into the current action instead of attaching.
    pub fn is_instant(&self) -> bool {
        matches!(self.duration, Some(0))
    }

    /// Converts an attaching delta into its effect form.
    pub fn to_effect(&self) -> ActiveEffect {
        ActiveEffect {
            name: self.source.clone(),
            stat: self.stat,
            value: EffectValue::Flat(self.value),
            duration: self.duration,
            max_triggers: self.max_triggers,
            times_triggered: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_and_percent_modify_in_order() {
        // +2 flat then +50% on a base of 10: (10 + 2) * 1.5
        let v = EffectValue::Flat(2).modify(10);
        assert_eq!(EffectValue::Percent(50).modify(v), 18);
    }

    #[test]
    fn flags_do_not_modify() {
        assert_eq!(EffectValue::Flag(true).modify(7), 7);
        assert_eq!(EffectValue::Text("shaken".into()).modify(7), 7);
    }

    #[test]
    fn trigger_cap() {
        let mut effect = ActiveEffect {
            name: "regeneration".into(),
            stat: StatKind::Hp,
            value: EffectValue::Flat(2),
            duration: Some(3),
            max_triggers: 2,
            times_triggered: 0,
        };
        assert!(effect.can_trigger());
        effect.times_triggered = 2;
        assert!(!effect.can_trigger());

        effect.max_triggers = 0; // unlimited
        assert!(effect.can_trigger());
    }

    #[test]
    fn template_magnitude_from_roll() {
        let template = EffectTemplate {
            name: "inspired".into(),
            stat: StatKind::Attack,
            value: EffectValue::Flat(1),
            duration: Some(2),
            max_triggers: 0,
            magnitude_from_roll: true,
        };
        let effect = template.instantiate(Some(4));
        assert_eq!(effect.value, EffectValue::Flat(4));

        // No roll supplied falls back to the declared value.
        let effect = template.instantiate(None);
        assert_eq!(effect.value, EffectValue::Flat(1));
    }
}
