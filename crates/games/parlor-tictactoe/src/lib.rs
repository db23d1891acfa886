pub mod bot;
pub mod rules;

use serde::{Deserialize, Serialize};

use parlor_core::catalog::GameKind;
use parlor_core::game::{DeferredAction, Move, MoveOutcome, PlayerScore, PortalGame};
use parlor_core::parlor_game_boilerplate;
use parlor_core::player::{Player, PlayerId};

use bot::{MoveSelector, RandomSelector};
use rules::evaluate;

/// Symbol owned by one seat. Seat 0 plays X, seat 1 plays O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn for_seat(seat: usize) -> Option<Mark> {
        match seat {
            0 => Some(Mark::X),
            1 => Some(Mark::O),
            _ => None,
        }
    }

    pub fn seat(self) -> usize {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }
}

/// The 9 cells, row-major. A marked cell never unmarks until `init`.
pub type Board = [Option<Mark>; 9];

/// Serializable board state for the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicTacToeState {
    pub board: Board,
    /// Seat to move; flips 0↔1 after every accepted move.
    pub current_seat: usize,
    pub move_count: u32,
    pub complete: bool,
    pub winner: Option<Mark>,
    pub winning_line: Option<[usize; 3]>,
    pub draw: bool,
}

impl TicTacToeState {
    fn fresh() -> Self {
        Self {
            board: [None; 9],
            current_seat: 0,
            move_count: 0,
            complete: false,
            winner: None,
            winning_line: None,
            draw: false,
        }
    }
}

/// The Tic Tac Toe engine.
pub struct TicTacToe {
    state: TicTacToeState,
    player_ids: Vec<PlayerId>,
    paused: bool,
    selector: Box<dyn MoveSelector>,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self::with_selector(Box::new(RandomSelector::new()))
    }

    /// Build with a specific automated-move selector.
    pub fn with_selector(selector: Box<dyn MoveSelector>) -> Self {
        Self {
            state: TicTacToeState::fresh(),
            player_ids: Vec::new(),
            paused: false,
            selector,
        }
    }

    pub fn state(&self) -> &TicTacToeState {
        &self.state
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl PortalGame for TicTacToe {
    fn kind(&self) -> GameKind {
        GameKind::TicTacToe
    }

    fn init(&mut self, players: &[Player]) {
        self.state = TicTacToeState::fresh();
        self.player_ids = players.iter().map(|p| p.id).collect();
        self.paused = false;
    }

    fn apply_move(&mut self, seat: usize, mv: &Move) -> MoveOutcome {
        let Move::TicTacToe { cell } = *mv else {
            tracing::debug!(?mv, "Dropped move for a different game");
            return MoveOutcome::Rejected;
        };
        if self.paused || self.state.complete {
            return MoveOutcome::Rejected;
        }
        let Some(mark) = Mark::for_seat(seat) else {
            return MoveOutcome::Rejected;
        };
        if cell >= 9 || self.state.board[cell].is_some() {
            tracing::debug!(seat, cell, "Rejected tic-tac-toe move");
            return MoveOutcome::Rejected;
        }

        self.state.board[cell] = Some(mark);
        self.state.move_count += 1;
        let next_seat = 1 - seat;
        self.state.current_seat = next_seat;

        let verdict = evaluate(&self.state.board);
        if verdict.winner.is_some() || verdict.draw {
            self.state.complete = true;
            self.state.winner = verdict.winner;
            self.state.winning_line = verdict.line;
            self.state.draw = verdict.draw;
        }

        MoveOutcome::Accepted {
            next_seat: Some(next_seat),
            deferred: None,
        }
    }

    fn resolve(&mut self, _action: DeferredAction) {}

    fn select_bot_move(&mut self, seat: usize) -> Option<Move> {
        if self.state.complete || Mark::for_seat(seat).is_none() {
            return None;
        }
        self.selector
            .select(&self.state.board)
            .map(|cell| Move::TicTacToe { cell })
    }

    parlor_game_boilerplate!(state_type: TicTacToeState);

    fn results(&self) -> Vec<PlayerScore> {
        self.player_ids
            .iter()
            .enumerate()
            .map(|(seat, &player_id)| PlayerScore {
                player_id,
                score: match self.state.winner {
                    Some(mark) if mark.seat() == seat => 1,
                    _ => 0,
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_core::test_helpers::{make_bot_pair, make_players};

    fn seeded_game() -> TicTacToe {
        TicTacToe::with_selector(Box::new(RandomSelector::seeded(99)))
    }

    #[test]
    fn accepted_move_marks_cell_and_flips_turn() {
        let mut game = seeded_game();
        game.init(&make_players(2));

        let outcome = game.apply_move(0, &Move::TicTacToe { cell: 4 });
        assert_eq!(
            outcome,
            MoveOutcome::Accepted {
                next_seat: Some(1),
                deferred: None
            }
        );
        assert_eq!(game.state().board[4], Some(Mark::X));
        assert_eq!(game.state().current_seat, 1);

        let outcome = game.apply_move(1, &Move::TicTacToe { cell: 0 });
        assert!(outcome.is_accepted());
        assert_eq!(game.state().board[0], Some(Mark::O));
        assert_eq!(game.state().current_seat, 0);
    }

    #[test]
    fn occupied_and_out_of_range_cells_rejected() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        assert!(game.apply_move(0, &Move::TicTacToe { cell: 4 }).is_accepted());

        assert_eq!(
            game.apply_move(1, &Move::TicTacToe { cell: 4 }),
            MoveOutcome::Rejected
        );
        assert_eq!(
            game.apply_move(1, &Move::TicTacToe { cell: 9 }),
            MoveOutcome::Rejected
        );
        // The rejected attempts must not consume the turn.
        assert_eq!(game.state().current_seat, 1);
        assert_eq!(game.state().move_count, 1);
    }

    #[test]
    fn wrong_game_move_rejected() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        assert_eq!(
            game.apply_move(0, &Move::Memory { card: 0 }),
            MoveOutcome::Rejected
        );
    }

    #[test]
    fn out_of_range_seat_rejected() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        assert_eq!(
            game.apply_move(2, &Move::TicTacToe { cell: 0 }),
            MoveOutcome::Rejected
        );
    }

    #[test]
    fn top_row_win_reports_line_and_scores() {
        let mut game = seeded_game();
        game.init(&make_players(2));

        for cell in [0, 3, 1, 4, 2] {
            let seat = game.state().current_seat;
            assert!(game.apply_move(seat, &Move::TicTacToe { cell }).is_accepted());
        }

        assert!(game.is_complete());
        assert_eq!(game.state().winner, Some(Mark::X));
        assert_eq!(game.state().winning_line, Some([0, 1, 2]));
        assert!(!game.state().draw);

        let results = game.results();
        assert_eq!(results[0].score, 1);
        assert_eq!(results[1].score, 0);
    }

    #[test]
    fn draw_scores_nobody() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        // X O X / X O O / O X X, played out in a legal order.
        for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            let seat = game.state().current_seat;
            assert!(game.apply_move(seat, &Move::TicTacToe { cell }).is_accepted());
        }
        assert!(game.is_complete());
        assert!(game.state().draw);
        assert_eq!(game.state().winner, None);
        assert!(game.results().iter().all(|r| r.score == 0));
    }

    #[test]
    fn completion_is_terminal() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        for cell in [0, 3, 1, 4, 2] {
            let seat = game.state().current_seat;
            game.apply_move(seat, &Move::TicTacToe { cell });
        }
        parlor_core::test_helpers::contract_complete_is_terminal(
            &mut game,
            &Move::TicTacToe { cell: 5 },
        );
    }

    #[test]
    fn pause_blocks_moves_until_resume() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        game.pause();
        assert_eq!(
            game.apply_move(0, &Move::TicTacToe { cell: 0 }),
            MoveOutcome::Rejected
        );
        game.resume();
        assert!(game.apply_move(0, &Move::TicTacToe { cell: 0 }).is_accepted());
    }

    #[test]
    fn bot_move_is_always_legal() {
        let mut game = seeded_game();
        game.init(&make_bot_pair());
        game.apply_move(0, &Move::TicTacToe { cell: 4 });

        let mv = game.select_bot_move(1).expect("board has open cells");
        let Move::TicTacToe { cell } = mv else {
            panic!("bot must produce a tic-tac-toe move, got {mv:?}");
        };
        assert!(game.state().board[cell].is_none());
        assert!(game.apply_move(1, &mv).is_accepted());
    }

    #[test]
    fn bot_takes_last_open_cell() {
        let mut game = seeded_game();
        game.init(&make_bot_pair());
        // Fill everything except cell 5 without completing a line:
        // X O X / X O _ / O X O leaves the game open at cell 5.
        use Mark::{O, X};
        let layout = [
            (0, X),
            (1, O),
            (2, X),
            (3, X),
            (4, O),
            (6, O),
            (7, X),
            (8, O),
        ];
        for (cell, mark) in layout {
            game.state.board[cell] = Some(mark);
        }
        assert_eq!(game.select_bot_move(1), Some(Move::TicTacToe { cell: 5 }));
    }

    #[test]
    fn bot_declines_after_completion() {
        let mut game = seeded_game();
        game.init(&make_bot_pair());
        for cell in [0, 3, 1, 4, 2] {
            let seat = game.state().current_seat;
            game.apply_move(seat, &Move::TicTacToe { cell });
        }
        assert_eq!(game.select_bot_move(1), None);
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================

    #[test]
    fn contract_init_creates_state() {
        let mut game = seeded_game();
        parlor_core::test_helpers::contract_init_creates_state(&mut game, 2);
    }

    #[test]
    fn contract_rejected_move_preserves_state() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        game.apply_move(0, &Move::TicTacToe { cell: 0 });
        parlor_core::test_helpers::contract_rejected_move_preserves_state(
            &mut game,
            1,
            &Move::TicTacToe { cell: 0 },
        );
    }

    #[test]
    fn contract_state_roundtrip_stable() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        game.apply_move(0, &Move::TicTacToe { cell: 8 });
        parlor_core::test_helpers::contract_state_roundtrip_stable(&mut game);
    }

    #[test]
    fn contract_results_cover_players() {
        let mut game = seeded_game();
        game.init(&make_players(2));
        parlor_core::test_helpers::contract_results_cover_players(&game, 2);
    }
}
