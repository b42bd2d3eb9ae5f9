//! Battle session façade.
//!
//! A [`BattleSession`] owns one battle's live state and sequences every
//! request atomically: validate → mutate roster → append log entry, or
//! nothing at all. After each successful mutation it publishes a
//! [`BattleEvent`] for viewers and checks the battle-end condition.
//!
//! Sessions have no interior locking; [`crate::SessionManager`] serializes
//! concurrent requests per battle id.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use battle_core::{
    Action, AttackAction, BattleAction, BattleConfig, BattleEngine, BattleEnv, BattleState,
    BattleVerdict, CastSpellAction, Participant, SetupError, SkillOracle, SpellOracle, TurnAdvance,
    UseSkillAction,
};

use crate::error::{Result, RuntimeError};
use crate::event::BattleEvent;

/// Identifier of one battle across the campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleId(pub u64);

impl std::fmt::Display for BattleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "battle#{}", self.0)
    }
}

/// Shared oracle handles a session resolves against.
pub type SharedSpells = Arc<dyn SpellOracle + Send + Sync>;
pub type SharedSkills = Arc<dyn SkillOracle + Send + Sync>;

/// Result of one successful resolution: the updated roster view, the
/// appended log entry, and the battle-end verdict checked afterwards.
#[derive(Clone, Debug)]
pub struct Resolution {
    pub roster: Vec<Participant>,
    pub entry: BattleAction,
    pub verdict: BattleVerdict,
}

/// One battle's externally callable surface.
pub struct BattleSession {
    id: BattleId,
    state: BattleState,
    spells: SharedSpells,
    skills: SharedSkills,
    events: broadcast::Sender<BattleEvent>,
}

impl BattleSession {
    /// Builds and starts a session from an initiative-ordered roster.
    ///
    /// Each participant's skill list is populated here from the skill-tree
    /// unlock reader; the engine only ever sees the resulting state.
    pub fn new(
        id: BattleId,
        mut roster: Vec<Participant>,
        spells: SharedSpells,
        skills: SharedSkills,
    ) -> Result<Self> {
        let config = BattleConfig::default();
        if roster.len() > config.max_participants {
            return Err(SetupError::RosterTooLarge {
                len: roster.len(),
                max: config.max_participants,
            }
            .into());
        }

        for participant in &mut roster {
            for skill_id in skills.unlocked(participant.id) {
                if let Some(def) = skills.skill(&skill_id) {
                    participant.skills.push(def.clone());
                }
            }
        }

        let mut state = BattleState::new(roster)?;
        state.start()?;
        let (events, _) = broadcast::channel(64);

        tracing::info!(battle = %id, participants = state.initiative.len(), "battle session started");
        Ok(Self {
            id,
            state,
            spells,
            skills,
            events,
        })
    }

    pub fn id(&self) -> BattleId {
        self.id
    }

    /// Read access to the live state.
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Subscribes a viewer to this session's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<BattleEvent> {
        self.events.subscribe()
    }

    /// Resolves a weapon/natural attack.
    pub fn resolve_attack(&mut self, action: AttackAction) -> Result<Resolution> {
        self.resolve(Action::Attack(action))
    }

    /// Resolves a spell cast.
    pub fn resolve_spell(&mut self, action: CastSpellAction) -> Result<Resolution> {
        self.resolve(Action::CastSpell(action))
    }

    /// Resolves a bonus-action skill use.
    pub fn resolve_skill(&mut self, action: UseSkillAction) -> Result<Resolution> {
        self.resolve(Action::UseSkill(action))
    }

    /// Advances the turn cursor, publishing the new position.
    pub fn advance_turn(&mut self) -> Result<TurnAdvance> {
        let mut engine = BattleEngine::new(&mut self.state);
        let advance = engine.advance_turn()?;

        tracing::debug!(
            battle = %self.id,
            round = advance.round,
            turn_index = advance.turn_index,
            "turn advanced"
        );
        let _ = self.events.send(BattleEvent::TurnAdvanced {
            battle: self.id,
            advance,
        });
        Ok(advance)
    }

    /// Restores the state captured before log entry `action_index` and
    /// truncates the log. The sole undo mechanism; there is no redo.
    pub fn rollback_to(&mut self, action_index: usize) -> Result<()> {
        let mut engine = BattleEngine::new(&mut self.state);
        engine.rollback_to(action_index)?;

        tracing::info!(battle = %self.id, action_index, "rolled back");
        let _ = self.events.send(BattleEvent::RolledBack {
            battle: self.id,
            action_index,
            roster: self.state.initiative.clone(),
        });
        Ok(())
    }

    /// Full reset: restores the oldest snapshot and clears the log.
    pub fn reset(&mut self) {
        let mut engine = BattleEngine::new(&mut self.state);
        engine.reset_battle();

        tracing::info!(battle = %self.id, "battle reset");
        let _ = self.events.send(BattleEvent::BattleReset { battle: self.id });
    }

    /// Battle-end query; does not mutate.
    pub fn check_battle_end(&mut self) -> BattleVerdict {
        BattleEngine::new(&mut self.state).check_battle_end()
    }

    /// Drives one action through the engine and publishes the outcome.
    fn resolve(&mut self, action: Action) -> Result<Resolution> {
        let span = tracing::debug_span!("resolve", battle = %self.id, actor = %action.actor());
        let _guard = span.enter();

        let env: BattleEnv<'_> = BattleEnv::with_all(self.spells.as_ref(), self.skills.as_ref());
        let mut engine = BattleEngine::new(&mut self.state);

        let entry = match engine.execute(&env, &action) {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(
                    code = battle_core::CoreError::error_code(&error),
                    kind = battle_core::CoreError::kind(&error).as_str(),
                    "action rejected"
                );
                return Err(RuntimeError::Execute(error));
            }
        };
        tracing::info!(action_index = entry.action_index, "action resolved");

        let verdict = engine.check_battle_end();
        if verdict.ended {
            engine.complete();
        }

        let roster = self.state.initiative.clone();
        let _ = self.events.send(BattleEvent::ActionResolved {
            battle: self.id,
            entry: entry.clone(),
            roster: roster.clone(),
        });
        if let Some(result) = verdict.result.filter(|_| verdict.ended) {
            tracing::info!(battle = %self.id, ?result, "battle ended");
            let _ = self.events.send(BattleEvent::BattleEnded {
                battle: self.id,
                result,
            });
        }

        Ok(Resolution {
            roster,
            entry,
            verdict,
        })
    }
}
