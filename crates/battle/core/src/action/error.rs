//! Action validation and execution errors.
//!
//! Each action has its own error type; every variant maps onto the shared
//! [`BattleErrorKind`] taxonomy so the request layer can classify rejections
//! without matching on variants.

use crate::dice::DiceError;
use crate::env::OracleError;
use crate::error::{BattleErrorKind, CoreError};
use crate::state::{ActionCost, ParticipantId, SkillId, SpellId};

// ============================================================================
// Attack
// ============================================================================

/// Errors that can occur while resolving an attack.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("attacker {0} not found in this battle")]
    AttackerNotFound(ParticipantId),

    #[error("target {0} not found in this battle")]
    TargetNotFound(ParticipantId),

    #[error("attack profile '{0}' not found on attacker")]
    ProfileNotFound(String),

    #[error("attacker {0} cannot act")]
    AttackerNotActive(ParticipantId),

    #[error("{0:?} slot already spent this turn")]
    SlotSpent(ActionCost),

    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error("hp left the [0, max] range after resolution")]
    HpInvariantViolated,
}

impl CoreError for AttackError {
    fn kind(&self) -> BattleErrorKind {
        use AttackError::*;
        match self {
            AttackerNotFound(_) | TargetNotFound(_) | ProfileNotFound(_) => {
                BattleErrorKind::NotFound
            }
            AttackerNotActive(_) | SlotSpent(_) => BattleErrorKind::InvalidState,
            Dice(_) | HpInvariantViolated => BattleErrorKind::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use AttackError::*;
        match self {
            AttackerNotFound(_) => "ATTACK_ATTACKER_NOT_FOUND",
            TargetNotFound(_) => "ATTACK_TARGET_NOT_FOUND",
            ProfileNotFound(_) => "ATTACK_PROFILE_NOT_FOUND",
            AttackerNotActive(_) => "ATTACK_ATTACKER_NOT_ACTIVE",
            SlotSpent(_) => "ATTACK_SLOT_SPENT",
            Dice(_) => "ATTACK_INVALID_DICE",
            HpInvariantViolated => "ATTACK_HP_INVARIANT",
        }
    }
}

// ============================================================================
// Spell
// ============================================================================

/// Errors that can occur while resolving a spell cast.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellError {
    #[error("caster {0} not found in this battle")]
    CasterNotFound(ParticipantId),

    #[error("spell '{0}' not found in the catalog")]
    SpellNotFound(SpellId),

    #[error("caster does not know spell '{0}'")]
    SpellNotKnown(SpellId),

    #[error("caster {0} cannot act")]
    CasterNotActive(ParticipantId),

    #[error("{0:?} slot already spent this turn")]
    SlotSpent(ActionCost),

    #[error("no level-{0} spell slot remaining")]
    NoSlotAvailable(u8),

    #[error("spell requires at least one target")]
    EmptyTargets,

    #[error("missing saving-throw roll for target {0}")]
    MissingSavingThrow(ParticipantId),

    #[error("spell defines a hit check but no hit roll was supplied")]
    MissingHitRoll,

    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("hp left the [0, max] range after resolution")]
    HpInvariantViolated,
}

impl CoreError for SpellError {
    fn kind(&self) -> BattleErrorKind {
        use SpellError::*;
        match self {
            CasterNotFound(_) | SpellNotFound(_) => BattleErrorKind::NotFound,
            Oracle(e) => e.kind(),
            SpellNotKnown(_) | CasterNotActive(_) | SlotSpent(_) | NoSlotAvailable(_) => {
                BattleErrorKind::InvalidState
            }
            EmptyTargets | MissingSavingThrow(_) | MissingHitRoll | Dice(_)
            | HpInvariantViolated => BattleErrorKind::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use SpellError::*;
        match self {
            CasterNotFound(_) => "SPELL_CASTER_NOT_FOUND",
            SpellNotFound(_) => "SPELL_NOT_FOUND",
            SpellNotKnown(_) => "SPELL_NOT_KNOWN",
            CasterNotActive(_) => "SPELL_CASTER_NOT_ACTIVE",
            SlotSpent(_) => "SPELL_SLOT_SPENT",
            NoSlotAvailable(_) => "SPELL_NO_SLOT_AVAILABLE",
            EmptyTargets => "SPELL_EMPTY_TARGETS",
            MissingSavingThrow(_) => "SPELL_MISSING_SAVING_THROW",
            MissingHitRoll => "SPELL_MISSING_HIT_ROLL",
            Dice(_) => "SPELL_INVALID_DICE",
            Oracle(e) => e.error_code(),
            HpInvariantViolated => "SPELL_HP_INVARIANT",
        }
    }
}

// ============================================================================
// Skill
// ============================================================================

/// Errors that can occur while resolving a bonus-action skill use.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillError {
    #[error("owner {0} not found in this battle")]
    OwnerNotFound(ParticipantId),

    #[error("skill '{0}' not present on owner")]
    SkillNotFound(SkillId),

    #[error("owner {0} cannot act")]
    OwnerNotActive(ParticipantId),

    #[error("skill '{0}' is not a bonus-action skill")]
    NotBonusAction(SkillId),

    #[error("skill '{0}' has no per-battle uses remaining")]
    UsageExhausted(SkillId),

    #[error("bonus action already spent this turn")]
    BonusActionSpent,
}

impl CoreError for SkillError {
    fn kind(&self) -> BattleErrorKind {
        use SkillError::*;
        match self {
            OwnerNotFound(_) | SkillNotFound(_) => BattleErrorKind::NotFound,
            OwnerNotActive(_) | UsageExhausted(_) | BonusActionSpent => {
                BattleErrorKind::InvalidState
            }
            NotBonusAction(_) => BattleErrorKind::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use SkillError::*;
        match self {
            OwnerNotFound(_) => "SKILL_OWNER_NOT_FOUND",
            SkillNotFound(_) => "SKILL_NOT_FOUND",
            OwnerNotActive(_) => "SKILL_OWNER_NOT_ACTIVE",
            NotBonusAction(_) => "SKILL_NOT_BONUS_ACTION",
            UsageExhausted(_) => "SKILL_USAGE_EXHAUSTED",
            BonusActionSpent => "SKILL_BONUS_ACTION_SPENT",
        }
    }
}
