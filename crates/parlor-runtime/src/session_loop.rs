use std::time::{Duration, Instant};

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use parlor_core::game::Move;
use parlor_core::session::{Difficulty, GameMode};

use crate::manager::SessionManager;

/// Commands sent from the front end to the session host loop.
#[derive(Debug)]
pub enum SessionCommand {
    Start {
        entry_id: String,
        mode: GameMode,
        difficulty: Option<Difficulty>,
    },
    Move(Move),
    Pause,
    Resume,
    Leave,
    Stop,
}

/// Broadcasts sent from the host loop back to the front end.
#[derive(Debug, Clone)]
pub enum SessionBroadcast {
    /// MessagePack-encoded session record.
    /// Uses `Bytes` for zero-copy cloning across subscribers.
    SessionUpdate(Bytes),
    /// MessagePack-encoded engine board state.
    BoardState(Bytes),
    /// Session start failed (unknown catalog entry).
    StartFailed(String),
    /// The active session was discarded, or the host loop exited.
    SessionEnded,
}

/// Spawn the session host as a tokio task.
/// Returns the command sender and broadcast receiver.
pub fn spawn_session_host(
    manager: SessionManager,
) -> (
    mpsc::UnboundedSender<SessionCommand>,
    mpsc::UnboundedReceiver<SessionBroadcast>,
    JoinHandle<()>,
) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (broadcast_tx, broadcast_rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        run_session_host(manager, cmd_rx, broadcast_tx).await;
    });

    (cmd_tx, broadcast_rx, handle)
}

/// The host loop: waits for whichever comes first, the next due timer
/// or a command, applies it on the manager, and broadcasts the result.
/// This is the only place that decides *when* the single-threaded
/// manager runs; all game timing flows through its scheduler.
async fn run_session_host(
    mut manager: SessionManager,
    mut cmd_rx: mpsc::UnboundedReceiver<SessionCommand>,
    broadcast_tx: mpsc::UnboundedSender<SessionBroadcast>,
) {
    loop {
        let next_due = manager.next_due();
        let deadline = tokio::time::Instant::from_std(
            next_due.unwrap_or_else(|| Instant::now() + Duration::from_secs(60)),
        );

        tokio::select! {
            _ = tokio::time::sleep_until(deadline), if next_due.is_some() => {
                if manager.poll(Instant::now()) > 0 {
                    broadcast_state(&manager, &broadcast_tx);
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(SessionCommand::Start { entry_id, mode, difficulty }) => {
                        match manager.start(&entry_id, mode, difficulty, Instant::now()) {
                            Ok(_) => broadcast_state(&manager, &broadcast_tx),
                            Err(e) => {
                                tracing::debug!(entry_id, error = %e, "Session start failed");
                                let _ = broadcast_tx
                                    .send(SessionBroadcast::StartFailed(e.to_string()));
                            },
                        }
                    },
                    Some(SessionCommand::Move(mv)) => {
                        if manager.apply_move(mv, Instant::now()).is_accepted() {
                            broadcast_state(&manager, &broadcast_tx);
                        }
                    },
                    Some(SessionCommand::Pause) => {
                        manager.pause();
                        broadcast_state(&manager, &broadcast_tx);
                    },
                    Some(SessionCommand::Resume) => {
                        manager.resume();
                        broadcast_state(&manager, &broadcast_tx);
                    },
                    Some(SessionCommand::Leave) => {
                        manager.leave();
                        let _ = broadcast_tx.send(SessionBroadcast::SessionEnded);
                    },
                    Some(SessionCommand::Stop) | None => {
                        break;
                    },
                }
            }
        }
    }

    manager.leave();
    let _ = broadcast_tx.send(SessionBroadcast::SessionEnded);
}

/// Push the current session record and board snapshot to the front end.
fn broadcast_state(
    manager: &SessionManager,
    broadcast_tx: &mpsc::UnboundedSender<SessionBroadcast>,
) {
    if let Some(session) = manager.session() {
        match rmp_serde::to_vec(session) {
            Ok(data) => {
                let _ = broadcast_tx.send(SessionBroadcast::SessionUpdate(Bytes::from(data)));
            },
            Err(e) => tracing::error!(error = %e, "Failed to encode session record"),
        }
    }
    if let Some(state) = manager.snapshot() {
        let _ = broadcast_tx.send(SessionBroadcast::BoardState(Bytes::from(state)));
    }
}
