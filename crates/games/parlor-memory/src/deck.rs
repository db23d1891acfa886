use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Number of symbol pairs in a deck.
pub const PAIR_COUNT: usize = 6;

/// Total cards dealt per puzzle.
pub const DECK_SIZE: usize = PAIR_COUNT * 2;

/// The fixed symbol set; each appears on exactly two cards.
pub const SYMBOLS: [char; PAIR_COUNT] = ['🎮', '🎲', '🎯', '🎪', '🎨', '🎭'];

/// One card in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: usize,
    pub symbol: char,
    pub face_up: bool,
    pub matched: bool,
}

/// Deal a freshly shuffled deck: every symbol twice, uniformly
/// permuted, all cards face down.
pub fn build_deck<R: Rng>(rng: &mut R) -> Vec<Card> {
    let mut symbols: Vec<char> = SYMBOLS.iter().flat_map(|&s| [s, s]).collect();
    symbols.shuffle(rng);
    symbols
        .into_iter()
        .enumerate()
        .map(|(id, symbol)| Card {
            id,
            symbol,
            face_up: false,
            matched: false,
        })
        .collect()
}
