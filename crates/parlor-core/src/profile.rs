use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::GameKind;

/// Per-game aggregate for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStat {
    pub played: u32,
    pub won: u32,
    pub high_score: u32,
    /// Total time in this game, seconds.
    pub time_played: u64,
}

/// Lifetime aggregates for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub games_played: u32,
    pub games_won: u32,
    pub total_score: u64,
    #[serde(default)]
    pub per_game: HashMap<GameKind, GameStat>,
}

/// An unlockable badge. `unlocked_at` is set only on a user's own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub unlocked_at: Option<String>,
}

/// A portal user as supplied by the identity provider. The session core
/// reads these for display and never writes back: achievement unlocks
/// and win/loss recording happen outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub level: u32,
    pub experience: u32,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub stats: UserStats,
    /// Ids of befriended users.
    #[serde(default)]
    pub friends: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeFrame {
    Daily,
    Weekly,
    Monthly,
    AllTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub score: u64,
    pub rank: u32,
}

/// A ranked score listing, optionally scoped to one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    pub kind: Option<GameKind>,
    pub time_frame: TimeFrame,
    pub entries: Vec<LeaderboardEntry>,
    pub last_updated: String,
}

impl Leaderboard {
    /// Rank users by lifetime total score, highest first. Ties keep
    /// the input order.
    pub fn all_time(users: &[User]) -> Self {
        let mut ranked: Vec<&User> = users.iter().collect();
        ranked.sort_by(|a, b| b.stats.total_score.cmp(&a.stats.total_score));
        let entries = ranked
            .iter()
            .enumerate()
            .map(|(i, user)| LeaderboardEntry {
                user_id: user.id.clone(),
                username: user.username.clone(),
                score: user.stats.total_score,
                rank: i as u32 + 1,
            })
            .collect();
        Self {
            kind: None,
            time_frame: TimeFrame::AllTime,
            entries,
            last_updated: crate::time::timestamp_now(),
        }
    }
}

/// Read-only source of user identities and historical stats.
pub trait ProfileProvider {
    fn current_user(&self) -> Option<&User>;
    fn user(&self, id: &str) -> Option<&User>;
    fn users(&self) -> &[User];
}

/// The badge lineup the portal displays.
pub fn builtin_achievements() -> Vec<Achievement> {
    let badge = |id: &str, title: &str, description: &str, icon: &str| Achievement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        unlocked_at: None,
    };
    vec![
        badge("a1", "First Victory", "Win your first game", "trophy"),
        badge(
            "a2",
            "Social Butterfly",
            "Add 5 friends to your network",
            "users",
        ),
        badge(
            "a3",
            "Game Master",
            "Win 10 games across any category",
            "award",
        ),
        badge(
            "a4",
            "Quiz Whiz",
            "Get a perfect score in a trivia game",
            "brain",
        ),
        badge(
            "a5",
            "Dedicated Player",
            "Play games for a total of 10 hours",
            "clock",
        ),
    ]
}

/// In-memory stand-in for the real identity provider.
#[derive(Debug, Clone)]
pub struct MockProfiles {
    users: Vec<User>,
    current: Option<usize>,
}

impl MockProfiles {
    pub fn new(users: Vec<User>) -> Self {
        let current = if users.is_empty() { None } else { Some(0) };
        Self { users, current }
    }

    pub fn builtin() -> Self {
        let badges = builtin_achievements();
        let unlocked = |badge: &Achievement, at: &str| Achievement {
            unlocked_at: Some(at.to_string()),
            ..badge.clone()
        };

        let mut veteran_per_game = HashMap::new();
        veteran_per_game.insert(
            GameKind::TicTacToe,
            GameStat {
                played: 15,
                won: 10,
                high_score: 0,
                time_played: 3600,
            },
        );
        veteran_per_game.insert(
            GameKind::Memory,
            GameStat {
                played: 8,
                won: 5,
                high_score: 2000,
                time_played: 2400,
            },
        );
        veteran_per_game.insert(
            GameKind::Trivia,
            GameStat {
                played: 12,
                won: 8,
                high_score: 8500,
                time_played: 3200,
            },
        );

        let mut rookie_per_game = HashMap::new();
        rookie_per_game.insert(
            GameKind::Memory,
            GameStat {
                played: 3,
                won: 1,
                high_score: 850,
                time_played: 900,
            },
        );

        Self::new(vec![
            User {
                id: "u1".to_string(),
                username: "GameMaster".to_string(),
                level: 10,
                experience: 2500,
                achievements: vec![
                    unlocked(&badges[0], "1673740800Z"),
                    unlocked(&badges[2], "1676851200Z"),
                ],
                stats: UserStats {
                    games_played: 45,
                    games_won: 28,
                    total_score: 15240,
                    per_game: veteran_per_game,
                },
                friends: vec!["u2".to_string()],
            },
            User {
                id: "u2".to_string(),
                username: "CasualKat".to_string(),
                level: 3,
                experience: 420,
                achievements: vec![unlocked(&badges[0], "1688169600Z")],
                stats: UserStats {
                    games_played: 7,
                    games_won: 2,
                    total_score: 1310,
                    per_game: rookie_per_game,
                },
                friends: vec!["u1".to_string()],
            },
        ])
    }
}

impl ProfileProvider for MockProfiles {
    fn current_user(&self) -> Option<&User> {
        self.current.and_then(|i| self.users.get(i))
    }

    fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn users(&self) -> &[User] {
        &self.users
    }
}
