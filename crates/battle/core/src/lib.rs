//! Deterministic combat resolution rules shared across the campaign manager.
//!
//! `battle-core` defines the canonical combat rules (actions, engine, battle
//! state) and exposes pure APIs that can be reused by the runtime façade and
//! offline tools. All state mutation flows through [`engine::BattleEngine`],
//! every die enters pre-rolled by the caller, and supporting crates depend on
//! the types re-exported here.

pub mod action;
pub mod combat;
pub mod config;
pub mod dice;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod trigger;

pub use action::{
    Action, ActionTransition, AttackAction, AttackError, CastSpellAction, SavingThrowRoll,
    SkillError, SpellError, UseSkillAction,
};
pub use combat::{DamageApplied, HealApplied, HitOutcome, SavePolicy};
pub use config::BattleConfig;
pub use dice::{D20, DiceError, DiceExpr};
pub use engine::{
    BattleEngine, BattleResult, BattleVerdict, ExecuteError, RollbackError, TransitionPhase,
    TransitionPhaseError, TurnAdvance, TurnError,
};
pub use env::{
    Ability, BattleEnv, Env, HitCheckDef, OracleError, SavingThrowDef, SkillOracle,
    SpellDefinition, SpellKind, SpellOracle, SpellScope, SpellTargeting,
};
pub use error::{BattleErrorKind, CoreError};
pub use state::{
    ActionCost, ActionFlags, ActionOutcome, ActiveEffect, AppliedValue, AttackKind, AttackProfile,
    AttackReport, BattleAction, BattleLog, BattlePhase, BattleState, CombatStats, Condition,
    EffectDelta, EffectTemplate, EffectValue, HitCheckReport, Participant, ParticipantId,
    PassiveTrait, ResourcePool, SaveReport, SetupError, Side, SkillId, SkillReport, SourceKind,
    SpellId, SpellReport, SpellSlot, Spellcasting, StatKind, StateSnapshot, TargetReport,
};
pub use trigger::{
    ActiveSkill, Comparison, FiredTriggers, SkillTrigger, TriggerDraws, TriggerEvent,
    TriggerTarget, UsageLimit, ValueKind, fire_single, fire_triggers,
};
