use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::rules::empty_cells;
use crate::Board;

/// Strategy seam for the automated opponent. The session carries a
/// difficulty setting that is not consulted yet; stronger selectors can
/// slot in behind this trait without touching the engine contract.
pub trait MoveSelector: Send {
    /// Pick a cell to mark, or `None` when the board has no empty cell.
    fn select(&mut self, board: &Board) -> Option<usize>;
}

/// Baseline selector: uniform choice among the empty cells.
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic selector for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomSelector {
    fn select(&mut self, board: &Board) -> Option<usize> {
        let open = empty_cells(board);
        if open.is_empty() {
            return None;
        }
        Some(open[self.rng.random_range(0..open.len())])
    }
}
