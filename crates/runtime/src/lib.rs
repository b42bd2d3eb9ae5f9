//! Runtime orchestration for the combat resolution engine.
//!
//! This crate wires the pure engine to the application: oracle adapters over
//! the content catalogs, the per-battle session façade, and the manager that
//! serializes concurrent requests. Consumers hold a [`SessionManager`] to
//! drive battles, subscribe to events, and publish updated state to viewers.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the per-battle façade and resolution sequencing
//! - [`manager`] provides the per-battle locking registry
//! - [`oracle`] adapts content catalogs to the core's oracle traits
//! - [`event`] defines the broadcast payloads viewers consume

pub mod error;
pub mod event;
pub mod manager;
pub mod oracle;
pub mod session;

pub use error::{Result, RuntimeError};
pub use event::BattleEvent;
pub use manager::SessionManager;
pub use oracle::{SkillOracleImpl, SpellOracleImpl};
pub use session::{BattleId, BattleSession, Resolution, SharedSkills, SharedSpells};
