use crate::{Board, Mark};

/// The 8 winning triples, in evaluation priority order: rows, columns,
/// diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Outcome of scanning a board for a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub winner: Option<Mark>,
    pub line: Option<[usize; 3]>,
    pub draw: bool,
}

/// Scan the fixed lines in priority order and report the first one
/// fully held by a single mark. A full board with no winner is a draw.
pub fn evaluate(board: &Board) -> Verdict {
    for line in WIN_LINES {
        let [a, b, c] = line;
        if let Some(mark) = board[a]
            && board[b] == Some(mark)
            && board[c] == Some(mark)
        {
            return Verdict {
                winner: Some(mark),
                line: Some(line),
                draw: false,
            };
        }
    }
    Verdict {
        winner: None,
        line: None,
        draw: board.iter().all(|cell| cell.is_some()),
    }
}

/// Indices of all unmarked cells.
pub fn empty_cells(board: &Board) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_none())
        .map(|(i, _)| i)
        .collect()
}
