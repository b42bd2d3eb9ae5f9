//! Data-driven combat content and loaders.
//!
//! This crate houses static catalog content and provides loaders for RON data
//! files:
//! - Spell definitions (data-driven via RON)
//! - Skill definitions (data-driven via RON)
//!
//! Content is consumed by runtime oracles and never appears in battle state.
//!
//! All loaders use battle-core types directly with serde for RON
//! deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{SkillCatalog, SpellCatalog};
