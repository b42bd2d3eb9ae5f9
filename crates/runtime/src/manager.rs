//! Per-battle request serialization.
//!
//! The engine requires exactly one resolution at a time per battle. The
//! manager keeps each session behind its own async mutex, so two battles
//! resolve fully concurrently while requests against one battle queue up.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use battle_core::{AttackAction, CastSpellAction, TurnAdvance, UseSkillAction};

use crate::error::{Result, RuntimeError};
use crate::session::{BattleId, BattleSession, Resolution};

/// Registry of live battle sessions.
#[derive(Default)]
pub struct SessionManager {
    sessions: Mutex<HashMap<BattleId, Arc<Mutex<BattleSession>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session and returns its shared handle.
    pub async fn insert(&self, session: BattleSession) -> Arc<Mutex<BattleSession>> {
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.lock().await.insert(id, handle.clone());
        handle
    }

    /// Looks up a session handle by battle id.
    pub async fn session(&self, id: BattleId) -> Result<Arc<Mutex<BattleSession>>> {
        self.sessions
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(RuntimeError::BattleNotFound(id))
    }

    /// Drops a finished session. Returns true if it existed.
    pub async fn remove(&self, id: BattleId) -> bool {
        self.sessions.lock().await.remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Convenience passthroughs — each takes the per-battle lock for the
    // duration of exactly one resolution.
    // ------------------------------------------------------------------

    pub async fn resolve_attack(&self, id: BattleId, action: AttackAction) -> Result<Resolution> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        session.resolve_attack(action)
    }

    pub async fn resolve_spell(&self, id: BattleId, action: CastSpellAction) -> Result<Resolution> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        session.resolve_spell(action)
    }

    pub async fn resolve_skill(&self, id: BattleId, action: UseSkillAction) -> Result<Resolution> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        session.resolve_skill(action)
    }

    pub async fn advance_turn(&self, id: BattleId) -> Result<TurnAdvance> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        session.advance_turn()
    }

    pub async fn rollback_to(&self, id: BattleId, action_index: usize) -> Result<()> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        session.rollback_to(action_index)
    }
}
