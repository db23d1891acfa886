use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::GameKind;
use crate::player::{Player, PlayerId};
use crate::time::timestamp_now;

/// How a session is populated with opponents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// One human against an automated opponent.
    VsBot,
    /// Two humans sharing one device.
    LocalTwoPlayer,
    /// Accepted but not wired to any transport; the session holds only
    /// the local player.
    Online,
}

/// Requested bot strength. Carried on the session for display; move
/// selection does not consult it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Waiting,
    Playing,
    Paused,
    Completed,
}

/// The live record of one play-through of a catalog entry.
///
/// Owned and mutated exclusively by the session manager; everything a
/// front end renders about the session that is not board state. Board
/// state lives in the engine and reaches the UI as snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub entry_id: String,
    pub kind: GameKind,
    pub mode: GameMode,
    pub difficulty: Option<Difficulty>,
    pub players: Vec<Player>,
    /// Index into `players` of the seat to move.
    pub current_seat: usize,
    pub status: SessionStatus,
    pub winner: Option<PlayerId>,
    pub started_at: String,
    pub last_updated_at: String,
}

impl Session {
    pub fn new(
        entry_id: String,
        kind: GameKind,
        mode: GameMode,
        difficulty: Option<Difficulty>,
        players: Vec<Player>,
    ) -> Self {
        let now = timestamp_now();
        Self {
            id: Uuid::new_v4(),
            entry_id,
            kind,
            mode,
            difficulty,
            players,
            current_seat: 0,
            status: SessionStatus::Playing,
            winner: None,
            started_at: now.clone(),
            last_updated_at: now,
        }
    }

    /// Refresh the last-updated timestamp. Called on every dispatched
    /// move, accepted or not.
    pub fn touch(&mut self) {
        self.last_updated_at = timestamp_now();
    }

    /// The player currently to move, if the seat index is populated.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_seat)
    }
}
