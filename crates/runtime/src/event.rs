//! Broadcast events published after successful mutations.
//!
//! Viewers (other DM screens, player views) subscribe to a session's channel
//! and re-render from the payloads. The engine itself never touches the
//! channel; only the façade publishes.

use battle_core::{BattleAction, BattleResult, Participant, TurnAdvance};
use serde::{Deserialize, Serialize};

use crate::session::BattleId;

/// One battle's outward-facing event stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// An attack, spell, or skill action resolved and was logged.
    ActionResolved {
        battle: BattleId,
        entry: BattleAction,
        roster: Vec<Participant>,
    },

    TurnAdvanced {
        battle: BattleId,
        advance: TurnAdvance,
    },

    RolledBack {
        battle: BattleId,
        action_index: usize,
        roster: Vec<Participant>,
    },

    BattleReset {
        battle: BattleId,
    },

    BattleEnded {
        battle: BattleId,
        result: BattleResult,
    },
}

impl BattleEvent {
    /// Wire form handed to the broadcast transport.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
