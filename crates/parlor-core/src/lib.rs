pub mod catalog;
pub mod game;
pub mod player;
pub mod profile;
pub mod session;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game::{Move, MoveOutcome, PortalGame};
    use crate::player::{Player, PlayerId};

    /// Create `n` test players with sequential IDs starting at 1.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::human(i as PlayerId + 1, format!("Player{}", i + 1)))
            .collect()
    }

    /// A human in seat 0 and an automated opponent in seat 1.
    pub fn make_bot_pair() -> Vec<Player> {
        vec![Player::human(1, "Player 1"), Player::bot(2, "Bot")]
    }

    /// Run `n` heartbeat ticks against the engine.
    pub fn run_ticks(game: &mut dyn PortalGame, n: usize) {
        for _ in 0..n {
            game.tick_second();
        }
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // These functions form a generic test suite that every PortalGame
    // implementation must pass. Game crates call them from their own
    // #[cfg(test)] modules with a concrete engine instance and moves
    // valid or invalid for that engine.

    /// After init() with N players, serialize_state() must return
    /// non-empty bytes.
    pub fn contract_init_creates_state(game: &mut dyn PortalGame, player_count: usize) {
        let players = make_players(player_count);
        game.init(&players);
        let state = game.serialize_state();
        assert!(
            !state.is_empty(),
            "serialize_state() must return non-empty bytes after init"
        );
    }

    /// A rejected move must leave the serialized state untouched.
    pub fn contract_rejected_move_preserves_state(
        game: &mut dyn PortalGame,
        seat: usize,
        bad_move: &Move,
    ) {
        let before = game.serialize_state();
        let outcome = game.apply_move(seat, bad_move);
        assert_eq!(
            outcome,
            MoveOutcome::Rejected,
            "move {bad_move:?} should have been rejected"
        );
        let after = game.serialize_state();
        assert_eq!(before, after, "rejected move must not change state");
    }

    /// serialize_state → apply_state roundtrip: the engine must produce
    /// stable state after applying its own serialized output.
    pub fn contract_state_roundtrip_stable(game: &mut dyn PortalGame) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        game.apply_state(&state_b);
        let state_c = game.serialize_state();
        assert_eq!(
            state_b, state_c,
            "state must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// results() must return an entry for each seated player.
    pub fn contract_results_cover_players(game: &dyn PortalGame, expected_players: usize) {
        let results = game.results();
        assert_eq!(
            results.len(),
            expected_players,
            "results must have one entry per seated player"
        );
    }

    /// Once complete, every further move must be rejected.
    pub fn contract_complete_is_terminal(game: &mut dyn PortalGame, mv: &Move) {
        assert!(
            game.is_complete(),
            "caller must drive the engine to completion first"
        );
        let before = game.serialize_state();
        assert_eq!(game.apply_move(0, mv), MoveOutcome::Rejected);
        assert_eq!(
            before,
            game.serialize_state(),
            "moves after completion must not change state"
        );
    }
}
