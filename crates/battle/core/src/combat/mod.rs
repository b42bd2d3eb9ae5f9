//! Combat resolution math.
//!
//! This module provides pure functions for resolving combat interactions.
//! All of it is deterministic and side-effect free: dice arrive pre-rolled,
//! state goes in by reference, numbers come out.
//!
//! # Architecture
//!
//! - **Pure Functions**: no state mutation except the explicit `apply_*` helpers
//! - **Used by Actions**: attack/spell transitions call these functions
//! - **Tagged Rules**: the death/unconscious divergence is a flat function of
//!   `SourceKind`, not a type hierarchy

pub mod damage;
pub mod hit;
pub mod result;
pub mod save;

pub use damage::{apply_damage, apply_heal, condition_after_damage};
pub use hit::{check_hit, resolve_attack_roll};
pub use result::{DamageApplied, HealApplied, HitOutcome};
pub use save::{SavePolicy, resolve_save, save_adjusted};
