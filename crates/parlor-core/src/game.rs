use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::GameKind;
use crate::player::{Player, PlayerId};

/// A move, tagged by the game it belongs to. Engines reject moves of
/// the wrong variant, so session dispatch stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    TicTacToe { cell: usize },
    Memory { card: usize },
}

impl Move {
    pub fn kind(&self) -> GameKind {
        match self {
            Move::TicTacToe { .. } => GameKind::TicTacToe,
            Move::Memory { .. } => GameKind::Memory,
        }
    }
}

/// A transition an engine wants applied after a fixed delay. The engine
/// only names the transition; the session runtime owns all timing and
/// delivers it back through [`PortalGame::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Settle the currently pending pair of face-up memory cards.
    ResolvePair,
}

/// A deferred transition plus the delay it should fire after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub delay: Duration,
    pub action: DeferredAction,
}

/// Result of dispatching a move to an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was invalid and nothing changed.
    Rejected,
    Accepted {
        /// Seat to move next, if the turn advances.
        next_seat: Option<usize>,
        /// Delayed transition to schedule, if any.
        deferred: Option<Deferred>,
    },
}

impl MoveOutcome {
    pub fn accepted(next_seat: usize) -> Self {
        Self::Accepted {
            next_seat: Some(next_seat),
            deferred: None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Score entry for a player at the end of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player_id: PlayerId,
    pub score: i32,
}

/// Core trait every Parlor game engine implements.
///
/// The session runtime manages the session record, timers, and player
/// tracking; the engine only handles its own rules and board state.
/// Engines are synchronous and single-threaded: the runtime calls into
/// them from one logical thread only.
pub trait PortalGame: Send {
    /// The catalog kind this engine serves.
    fn kind(&self) -> GameKind;

    /// Reset to a fresh board for these players. Seat order follows the
    /// slice order.
    fn init(&mut self, players: &[Player]);

    /// Apply one move for the given seat. Invalid moves are rejected
    /// with no state change.
    fn apply_move(&mut self, seat: usize, mv: &Move) -> MoveOutcome;

    /// Deliver a delayed transition previously returned from
    /// `apply_move`. Must tolerate being called when the transition no
    /// longer applies.
    fn resolve(&mut self, action: DeferredAction);

    /// One-second heartbeat while the session is live. Engines without
    /// a clock ignore it.
    fn tick_second(&mut self) {}

    /// Pick a move for an automated seat. `None` when this engine has
    /// no automated opponent or no legal move remains.
    fn select_bot_move(&mut self, seat: usize) -> Option<Move> {
        let _ = seat;
        None
    }

    /// Serialize the board state for the front end.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the board state with a previously serialized snapshot.
    fn apply_state(&mut self, state: &[u8]);

    fn pause(&mut self);

    fn resume(&mut self);

    /// Whether the play-through has reached a terminal state.
    fn is_complete(&self) -> bool;

    /// Final scores for the completed play-through.
    fn results(&self) -> Vec<PlayerScore>;
}

/// Generates the 5 boilerplate `PortalGame` methods that are identical
/// across engines: `serialize_state`, `apply_state`, `pause`, `resume`,
/// `is_complete`.
///
/// Requires the implementing struct to have `state: $StateType` and
/// `paused: bool` fields, and `$StateType` to have a `complete: bool`
/// field.
#[macro_export]
macro_rules! parlor_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            if let Ok(s) = rmp_serde::from_slice::<$StateType>(state) {
                self.state = s;
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_complete(&self) -> bool {
            self.state.complete
        }
    };
}
