use serde::{Deserialize, Serialize};

/// Unique identifier for a player within a session.
pub type PlayerId = u64;

/// A participant in a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub score: i32,
    pub is_ready: bool,
    pub is_active: bool,
    pub is_bot: bool,
}

impl Player {
    /// A human player with the given seat-order id and name.
    pub fn human(id: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            score: 0,
            is_ready: true,
            is_active: true,
            is_bot: false,
        }
    }

    /// An automated opponent.
    pub fn bot(id: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            is_bot: true,
            ..Self::human(id, display_name)
        }
    }
}
