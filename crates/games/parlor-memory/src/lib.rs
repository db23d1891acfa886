pub mod config;
pub mod deck;

use serde::{Deserialize, Serialize};

use rand::SeedableRng;
use rand::rngs::StdRng;

use parlor_core::catalog::GameKind;
use parlor_core::game::{Deferred, DeferredAction, Move, MoveOutcome, PlayerScore, PortalGame};
use parlor_core::parlor_game_boilerplate;
use parlor_core::player::{Player, PlayerId};

use config::MemoryConfig;
use deck::{Card, PAIR_COUNT, build_deck};

/// Serializable puzzle state for the front end.
///
/// Invariant: at most two cards are face-up-but-unmatched at any time,
/// and those are exactly the entries of `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryState {
    pub cards: Vec<Card>,
    /// Indices of the up-to-two face-up cards awaiting resolution.
    pub pending: Vec<usize>,
    /// Completed pair comparisons (one per two flips).
    pub moves: u32,
    pub matched_pairs: u32,
    /// Seconds since the first flip, frozen while paused or solved.
    pub elapsed_secs: u32,
    /// True once the first card of a fresh puzzle has been flipped.
    pub running: bool,
    pub complete: bool,
}

impl MemoryState {
    fn fresh(cards: Vec<Card>) -> Self {
        Self {
            cards,
            pending: Vec::new(),
            moves: 0,
            matched_pairs: 0,
            elapsed_secs: 0,
            running: false,
            complete: false,
        }
    }
}

/// The Memory Match engine.
///
/// Flip resolution is deliberately split in two: the second flip of a
/// pair only records the comparison and asks the session runtime to
/// call back through `resolve` after the configured delay, so the
/// reveal window is timing the runtime owns and can cancel.
pub struct MemoryGame {
    state: MemoryState,
    player_ids: Vec<PlayerId>,
    paused: bool,
    config: MemoryConfig,
    rng: StdRng,
}

impl MemoryGame {
    pub fn new() -> Self {
        Self::with_config(MemoryConfig::load())
    }

    pub fn with_config(config: MemoryConfig) -> Self {
        let mut rng = StdRng::from_os_rng();
        let state = MemoryState::fresh(build_deck(&mut rng));
        Self {
            state,
            player_ids: Vec::new(),
            paused: false,
            config,
            rng,
        }
    }

    /// Deterministic deck order for tests.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = MemoryState::fresh(build_deck(&mut rng));
        Self {
            state,
            player_ids: Vec::new(),
            paused: false,
            config: MemoryConfig::default(),
            rng,
        }
    }

    pub fn state(&self) -> &MemoryState {
        &self.state
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// `(moves, elapsed_secs)` once the puzzle is solved.
    pub fn final_report(&self) -> Option<(u32, u32)> {
        self.state
            .complete
            .then_some((self.state.moves, self.state.elapsed_secs))
    }

    fn pending_pair(&self) -> Option<(usize, usize)> {
        match self.state.pending[..] {
            [a, b] => Some((a, b)),
            _ => None,
        }
    }
}

impl Default for MemoryGame {
    fn default() -> Self {
        Self::new()
    }
}

impl PortalGame for MemoryGame {
    fn kind(&self) -> GameKind {
        GameKind::Memory
    }

    fn init(&mut self, players: &[Player]) {
        self.state = MemoryState::fresh(build_deck(&mut self.rng));
        self.player_ids = players.iter().map(|p| p.id).collect();
        self.paused = false;
    }

    fn apply_move(&mut self, _seat: usize, mv: &Move) -> MoveOutcome {
        let Move::Memory { card } = *mv else {
            tracing::debug!(?mv, "Dropped move for a different game");
            return MoveOutcome::Rejected;
        };
        if self.paused || self.state.complete || card >= self.state.cards.len() {
            return MoveOutcome::Rejected;
        }
        // Face-up covers both "already matched is showing" partners and
        // a repeat tap on the first card of the pair.
        if self.state.cards[card].face_up || self.state.cards[card].matched {
            return MoveOutcome::Rejected;
        }
        if self.state.pending.len() == 2 {
            tracing::debug!(card, "Flip rejected while a pair is unresolved");
            return MoveOutcome::Rejected;
        }

        // First flip of a fresh puzzle starts the clock.
        if !self.state.running {
            self.state.running = true;
        }

        self.state.cards[card].face_up = true;
        self.state.pending.push(card);

        let deferred = if let Some((first, second)) = self.pending_pair() {
            self.state.moves += 1;
            let matched = self.state.cards[first].symbol == self.state.cards[second].symbol;
            let delay = if matched {
                self.config.confirm_delay()
            } else {
                self.config.revert_delay()
            };
            Some(Deferred {
                delay,
                action: DeferredAction::ResolvePair,
            })
        } else {
            None
        };

        MoveOutcome::Accepted {
            next_seat: None,
            deferred,
        }
    }

    fn resolve(&mut self, action: DeferredAction) {
        let DeferredAction::ResolvePair = action;
        let Some((first, second)) = self.pending_pair() else {
            // Stale or duplicate resolution; nothing to settle.
            return;
        };
        self.state.pending.clear();

        if self.state.cards[first].symbol == self.state.cards[second].symbol {
            self.state.cards[first].matched = true;
            self.state.cards[second].matched = true;
            self.state.matched_pairs += 1;
            if self.state.matched_pairs as usize == PAIR_COUNT {
                self.state.complete = true;
                self.state.running = false;
                tracing::info!(
                    moves = self.state.moves,
                    elapsed_secs = self.state.elapsed_secs,
                    "Memory puzzle solved"
                );
            }
        } else {
            self.state.cards[first].face_up = false;
            self.state.cards[second].face_up = false;
        }
    }

    fn tick_second(&mut self) {
        if self.state.running && !self.state.complete && !self.paused {
            self.state.elapsed_secs += 1;
        }
    }

    parlor_game_boilerplate!(state_type: MemoryState);

    fn results(&self) -> Vec<PlayerScore> {
        // Completion reporting is the moves/elapsed pair; no score is
        // recorded back to players.
        self.player_ids
            .iter()
            .map(|&player_id| PlayerScore {
                player_id,
                score: 0,
            })
            .collect()
    }
}
