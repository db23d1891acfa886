use serde::{Deserialize, Serialize};

use crate::session::GameMode;

/// The kinds of games the portal knows about. Only some have engines;
/// the rest are catalog entries awaiting an implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    TicTacToe,
    Memory,
    Trivia,
    Chess,
    ColorCards,
}

/// Static metadata for one playable game in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub kind: GameKind,
    pub title: String,
    pub description: String,
    pub min_players: u8,
    pub max_players: u8,
    pub supported_modes: Vec<GameMode>,
    pub categories: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

/// The read-only list of playable games. Immutable after construction;
/// the session layer only ever looks entries up by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The standard portal lineup.
    pub fn builtin() -> Self {
        let all_modes = vec![GameMode::VsBot, GameMode::LocalTwoPlayer, GameMode::Online];
        Self::new(vec![
            CatalogEntry {
                id: "1".to_string(),
                kind: GameKind::TicTacToe,
                title: "Tic Tac Toe".to_string(),
                description: "Classic game of X and O. Be the first to get three in a row!"
                    .to_string(),
                min_players: 2,
                max_players: 2,
                supported_modes: all_modes.clone(),
                categories: vec!["strategy".to_string(), "casual".to_string()],
                featured: true,
            },
            CatalogEntry {
                id: "2".to_string(),
                kind: GameKind::Memory,
                title: "Memory Match".to_string(),
                description:
                    "Test your memory by matching pairs of cards. Find all matches to win!"
                        .to_string(),
                min_players: 1,
                max_players: 4,
                supported_modes: all_modes.clone(),
                categories: vec!["puzzle".to_string(), "casual".to_string()],
                featured: true,
            },
            CatalogEntry {
                id: "3".to_string(),
                kind: GameKind::Trivia,
                title: "Trivia Challenge".to_string(),
                description: "Test your knowledge with hundreds of trivia questions across \
                              various categories!"
                    .to_string(),
                min_players: 1,
                max_players: 8,
                supported_modes: vec![GameMode::LocalTwoPlayer, GameMode::Online],
                categories: vec!["trivia".to_string(), "education".to_string()],
                featured: false,
            },
            CatalogEntry {
                id: "4".to_string(),
                kind: GameKind::Chess,
                title: "Chess".to_string(),
                description: "The classic game of strategy. Challenge your mind and defeat \
                              your opponent!"
                    .to_string(),
                min_players: 2,
                max_players: 2,
                supported_modes: all_modes.clone(),
                categories: vec!["strategy".to_string(), "board".to_string()],
                featured: false,
            },
            CatalogEntry {
                id: "5".to_string(),
                kind: GameKind::ColorCards,
                title: "Color Cards".to_string(),
                description: "Match colors and numbers, and be the first to get rid of all \
                              your cards!"
                    .to_string(),
                min_players: 2,
                max_players: 8,
                supported_modes: all_modes,
                categories: vec!["card".to_string(), "casual".to_string()],
                featured: false,
            },
        ])
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn featured(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|e| e.featured)
    }
}
