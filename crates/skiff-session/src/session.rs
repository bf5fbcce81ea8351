use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skiff_core::types::Turn;
use std::fmt;

/// Hard cap on turns retained per session. Appending beyond it evicts the
/// oldest turns first.
pub const HISTORY_CAP: usize = 50;

/// Exchanges (one user turn plus one assistant turn) included in any
/// single outbound prompt. Read-time truncation only; storage keeps up to
/// [`HISTORY_CAP`] turns.
pub const CONTEXT_EXCHANGES: usize = 10;

/// One client's conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    turns: Vec<Turn>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            updated_at: now,
            turns: Vec::new(),
        }
    }

    /// Append a turn, evicting from the front until the cap holds.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        if self.turns.len() > HISTORY_CAP {
            let excess = self.turns.len() - HISTORY_CAP;
            self.turns.drain(..excess);
        }
        self.updated_at = Utc::now();
    }

    /// The chronologically last `2 * exchange_limit` turns, oldest first.
    /// Never mutates stored history.
    pub fn recent(&self, exchange_limit: usize) -> &[Turn] {
        let max_turns = exchange_limit.saturating_mul(2);
        let start = self.turns.len().saturating_sub(max_turns);
        &self.turns[start..]
    }

    /// Reset history to empty. Idempotent.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.updated_at = Utc::now();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session(id={}, turns={})", self.id, self.turns.len())
    }
}
