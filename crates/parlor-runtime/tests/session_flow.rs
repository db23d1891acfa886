//! End-to-end session flows: catalog → session → engine → completion,
//! driven through the manager with a synthetic clock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parlor_core::catalog::Catalog;
use parlor_core::game::Move;
use parlor_core::session::{GameMode, SessionStatus};
use parlor_memory::MemoryState;
use parlor_runtime::{EngineRegistry, RuntimeConfig, SessionManager};
use parlor_tictactoe::{Mark, TicTacToeState};

fn manager() -> SessionManager {
    SessionManager::with_parts(
        Catalog::builtin(),
        EngineRegistry::new(),
        RuntimeConfig::default(),
    )
}

fn board(mgr: &SessionManager) -> TicTacToeState {
    rmp_serde::from_slice(&mgr.snapshot().expect("active engine")).expect("board decodes")
}

fn deck(mgr: &SessionManager) -> MemoryState {
    rmp_serde::from_slice(&mgr.snapshot().expect("active engine")).expect("deck decodes")
}

/// Walk the clock forward in small steps so every timer fires at
/// (roughly) its own deadline, the way a live driver would.
fn advance(mgr: &mut SessionManager, from: Instant, by: Duration) -> Instant {
    let step = Duration::from_millis(100);
    let mut now = from;
    let end = from + by;
    while now < end {
        now += step;
        mgr.poll(now);
    }
    now
}

#[test]
fn two_player_line_completes_the_session() {
    let mut mgr = manager();
    let now = Instant::now();
    mgr.start("1", GameMode::LocalTwoPlayer, None, now).unwrap();

    for cell in [0, 3, 1, 4, 2] {
        assert!(mgr.apply_move(Move::TicTacToe { cell }, now).is_accepted());
    }

    let session = mgr.session().unwrap();
    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.winner, Some(1));
    assert_eq!(session.players[0].score, 1);
    assert_eq!(session.players[1].score, 0);

    let state = board(&mgr);
    assert_eq!(state.winner, Some(Mark::X));
    assert_eq!(state.winning_line, Some([0, 1, 2]));

    // Terminal: nothing further is accepted and no timers remain.
    assert!(!mgr.apply_move(Move::TicTacToe { cell: 5 }, now).is_accepted());
    assert_eq!(mgr.pending_timers(), 0);
}

#[test]
fn bot_answers_between_polls() {
    let mut mgr = manager();
    let mut now = Instant::now();
    mgr.start("1", GameMode::VsBot, None, now).unwrap();

    assert!(mgr.apply_move(Move::TicTacToe { cell: 4 }, now).is_accepted());
    assert_eq!(mgr.session().unwrap().current_seat, 1);

    // Nothing happens before the bot's delay elapses.
    mgr.poll(now + Duration::from_millis(100));
    assert_eq!(mgr.session().unwrap().current_seat, 1);

    now = advance(&mut mgr, now, Duration::from_millis(700));
    let _ = now;
    assert_eq!(mgr.session().unwrap().current_seat, 0);
    let state = board(&mgr);
    let o_marks = state
        .board
        .iter()
        .filter(|c| **c == Some(Mark::O))
        .count();
    assert_eq!(o_marks, 1, "bot should have placed exactly one mark");
    assert!(state.board[4] == Some(Mark::X));
}

#[test]
fn bot_game_runs_to_completion() {
    let mut mgr = manager();
    let mut now = Instant::now();
    mgr.start("1", GameMode::VsBot, None, now).unwrap();

    for _ in 0..50 {
        let session = mgr.session().unwrap();
        if session.status == SessionStatus::Completed {
            break;
        }
        if session.current_seat == 0 {
            let state = board(&mgr);
            let cell = state
                .board
                .iter()
                .position(|c| c.is_none())
                .expect("open board while playing");
            mgr.apply_move(Move::TicTacToe { cell }, now);
        } else {
            now = advance(&mut mgr, now, Duration::from_millis(700));
        }
    }

    assert_eq!(mgr.session().unwrap().status, SessionStatus::Completed);
    let state = board(&mgr);
    assert!(state.winner.is_some() || state.draw);
}

#[test]
fn memory_solve_counts_moves_and_time() {
    let mut mgr = manager();
    let start = Instant::now();
    let mut now = start;
    mgr.start("2", GameMode::Online, None, now).unwrap();

    let state = deck(&mgr);
    assert_eq!(state.cards.len(), 12);
    let mut by_symbol: HashMap<char, Vec<usize>> = HashMap::new();
    for card in &state.cards {
        by_symbol.entry(card.symbol).or_default().push(card.id);
    }
    assert_eq!(by_symbol.len(), 6);
    let pairs: Vec<(usize, usize)> = by_symbol.values().map(|v| (v[0], v[1])).collect();

    // One deliberate miss: the first card of two different pairs.
    let miss = (pairs[0].0, pairs[1].0);
    assert!(mgr.apply_move(Move::Memory { card: miss.0 }, now).is_accepted());
    assert!(mgr.apply_move(Move::Memory { card: miss.1 }, now).is_accepted());
    // A third flip while the pair is unresolved goes nowhere.
    assert!(!mgr.apply_move(Move::Memory { card: pairs[2].0 }, now).is_accepted());
    now = advance(&mut mgr, now, Duration::from_millis(1100));

    let state = deck(&mgr);
    assert!(state.cards.iter().all(|c| !c.face_up), "miss must revert");
    assert_eq!(state.moves, 1);

    for (first, second) in pairs {
        assert!(mgr.apply_move(Move::Memory { card: first }, now).is_accepted());
        assert!(mgr.apply_move(Move::Memory { card: second }, now).is_accepted());
        now = advance(&mut mgr, now, Duration::from_millis(600));
    }

    let session = mgr.session().unwrap();
    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.winner, None);

    let state = deck(&mgr);
    assert!(state.complete);
    assert_eq!(state.matched_pairs, 6);
    // 6 successful comparisons plus the 1 miss.
    assert_eq!(state.moves, 7);
    let simulated_secs = now.duration_since(start).as_secs() as u32;
    assert!(
        state.elapsed_secs <= simulated_secs,
        "elapsed {} must not exceed wall clock {}",
        state.elapsed_secs,
        simulated_secs
    );

    assert!(!mgr.apply_move(Move::Memory { card: 0 }, now).is_accepted());
    assert_eq!(mgr.pending_timers(), 0);
}

#[test]
fn elapsed_clock_follows_pause_and_resume() {
    let mut mgr = manager();
    let mut now = Instant::now();
    mgr.start("2", GameMode::Online, None, now).unwrap();

    assert!(mgr.apply_move(Move::Memory { card: 0 }, now).is_accepted());
    now = advance(&mut mgr, now, Duration::from_secs(3));
    assert_eq!(deck(&mgr).elapsed_secs, 3);

    mgr.pause();
    assert_eq!(mgr.session().unwrap().status, SessionStatus::Paused);
    now = advance(&mut mgr, now, Duration::from_secs(4));
    assert_eq!(deck(&mgr).elapsed_secs, 3, "paused clock must freeze");

    mgr.resume();
    now = advance(&mut mgr, now, Duration::from_secs(2));
    let _ = now;
    assert_eq!(deck(&mgr).elapsed_secs, 5);
}

#[test]
fn leaving_mid_reveal_cannot_touch_the_next_session() {
    let mut mgr = manager();
    let now = Instant::now();
    mgr.start("2", GameMode::Online, None, now).unwrap();

    // Put a pair mid-reveal so a revert is in flight, then walk away.
    let state = deck(&mgr);
    let other = state
        .cards
        .iter()
        .position(|c| c.symbol != state.cards[0].symbol)
        .unwrap();
    mgr.apply_move(Move::Memory { card: 0 }, now);
    mgr.apply_move(Move::Memory { card: other }, now);
    assert!(mgr.pending_timers() > 0);

    mgr.leave();
    assert!(mgr.session().is_none());

    mgr.start("2", GameMode::Online, None, now).unwrap();
    let mut later = now;
    later = advance(&mut mgr, later, Duration::from_secs(3));
    let _ = later;

    let state = deck(&mgr);
    assert!(
        state.cards.iter().all(|c| !c.face_up && !c.matched),
        "a discarded session's timers must not reach the new deck"
    );
    assert!(!state.running);
    assert_eq!(state.elapsed_secs, 0, "clock only starts on first flip");
    assert_eq!(state.moves, 0);
}

#[test]
fn session_timestamps_are_populated() {
    let mut mgr = manager();
    let now = Instant::now();
    mgr.start("1", GameMode::LocalTwoPlayer, None, now).unwrap();
    let session = mgr.session().unwrap();
    assert!(!session.started_at.is_empty());
    assert_eq!(session.started_at, session.last_updated_at);
}
