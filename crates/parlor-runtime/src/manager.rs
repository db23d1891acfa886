use std::time::Instant;

use parlor_core::catalog::Catalog;
use parlor_core::game::{Move, MoveOutcome, PortalGame};
use parlor_core::player::Player;
use parlor_core::session::{Difficulty, GameMode, Session, SessionStatus};

use crate::config::RuntimeConfig;
use crate::error::PortalError;
use crate::registry::EngineRegistry;
use crate::scheduler::{Scheduler, TimerEvent};

/// The live session plus the engine that owns its board.
struct ActiveSession {
    session: Session,
    /// `None` for catalog entries without a registered engine; their
    /// sessions exist but ignore moves.
    engine: Option<Box<dyn PortalGame>>,
}

/// Owns the single active play-through and every timer attached to it.
///
/// All mutation happens through `&mut self` on one logical thread:
/// moves and control calls arrive from the front end, delayed
/// transitions arrive through [`poll`](Self::poll). Discarding a
/// session bumps the generation counter, so timer events scheduled for
/// it can never touch a successor.
pub struct SessionManager {
    catalog: Catalog,
    registry: EngineRegistry,
    config: RuntimeConfig,
    scheduler: Scheduler,
    active: Option<ActiveSession>,
    generation: u64,
}

impl SessionManager {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_parts(catalog, EngineRegistry::new(), RuntimeConfig::load())
    }

    pub fn with_parts(catalog: Catalog, registry: EngineRegistry, config: RuntimeConfig) -> Self {
        Self {
            catalog,
            registry,
            config,
            scheduler: Scheduler::new(),
            active: None,
            generation: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref().map(|a| &a.session)
    }

    /// Serialized board state of the active engine, for the front end.
    pub fn snapshot(&self) -> Option<Vec<u8>> {
        self.active
            .as_ref()
            .and_then(|a| a.engine.as_ref())
            .map(|e| e.serialize_state())
    }

    /// Number of queued timer events (all generations).
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// When the next timer event becomes due.
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    /// Start a session for a catalog entry, replacing any active one.
    pub fn start(
        &mut self,
        entry_id: &str,
        mode: GameMode,
        difficulty: Option<Difficulty>,
        now: Instant,
    ) -> Result<&Session, PortalError> {
        let entry = self
            .catalog
            .get(entry_id)
            .ok_or_else(|| PortalError::EntryNotFound(entry_id.to_string()))?
            .clone();

        self.discard();

        let players = Self::build_players(mode);
        let mut engine = self.registry.create(entry.kind);
        if let Some(engine) = engine.as_mut() {
            engine.init(&players);
        }

        let session = Session::new(entry.id, entry.kind, mode, difficulty, players);
        tracing::info!(
            session_id = %session.id,
            kind = ?entry.kind,
            ?mode,
            "Session started"
        );

        if engine.is_some() {
            self.scheduler.schedule(
                now + self.config.heartbeat(),
                self.generation,
                TimerEvent::SecondTick,
            );
        }

        let active = self.active.insert(ActiveSession { session, engine });
        Ok(&active.session)
    }

    /// One human always holds seat 0; the second seat depends on mode.
    /// Online mode has no transport yet, so its sessions hold only the
    /// local player.
    fn build_players(mode: GameMode) -> Vec<Player> {
        let mut players = vec![Player::human(1, "Player 1")];
        match mode {
            GameMode::VsBot => players.push(Player::bot(2, "Bot")),
            GameMode::LocalTwoPlayer => players.push(Player::human(2, "Player 2")),
            GameMode::Online => {},
        }
        players
    }

    /// Dispatch a move for the seat currently to play. Invalid moves
    /// are rejected with no board change; every dispatch refreshes the
    /// session's last-updated timestamp.
    pub fn apply_move(&mut self, mv: Move, now: Instant) -> MoveOutcome {
        let generation = self.generation;
        let outcome = {
            let Some(active) = self.active.as_mut() else {
                tracing::debug!(?mv, "Move with no active session");
                return MoveOutcome::Rejected;
            };
            active.session.touch();
            if active.session.status != SessionStatus::Playing {
                return MoveOutcome::Rejected;
            }
            let Some(engine) = active.engine.as_mut() else {
                tracing::debug!(kind = ?active.session.kind, "No engine for kind; move ignored");
                return MoveOutcome::Rejected;
            };

            let seat = active.session.current_seat;
            let outcome = engine.apply_move(seat, &mv);
            if let MoveOutcome::Accepted {
                next_seat: Some(next),
                ..
            } = outcome
            {
                active.session.current_seat = next;
            }
            outcome
        };

        if let MoveOutcome::Accepted {
            deferred: Some(deferred),
            ..
        } = outcome
        {
            self.scheduler.schedule(
                now + deferred.delay,
                generation,
                TimerEvent::Engine(deferred.action),
            );
        }
        if outcome.is_accepted() {
            self.settle(now);
        }
        outcome
    }

    /// Process every timer event that is due. Returns the number of
    /// events applied (stale events are dropped silently).
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        while let Some((generation, event)) = self.scheduler.pop_due(now) {
            if generation != self.generation {
                tracing::debug!(?event, generation, "Dropped stale timer event");
                continue;
            }
            applied += 1;
            match event {
                TimerEvent::SecondTick => {
                    let reschedule = {
                        let Some(active) = self.active.as_mut() else {
                            continue;
                        };
                        match active.engine.as_mut() {
                            Some(engine) => {
                                engine.tick_second();
                                !engine.is_complete()
                            },
                            None => false,
                        }
                    };
                    if reschedule {
                        self.scheduler.schedule(
                            now + self.config.heartbeat(),
                            generation,
                            TimerEvent::SecondTick,
                        );
                    }
                },
                TimerEvent::BotMove => {
                    let mv = {
                        let Some(active) = self.active.as_mut() else {
                            continue;
                        };
                        if active.session.status != SessionStatus::Playing {
                            continue;
                        }
                        let seat = active.session.current_seat;
                        // The turn may have moved on since this was
                        // scheduled; only act if a bot still holds it.
                        if !active.session.players.get(seat).is_some_and(|p| p.is_bot) {
                            continue;
                        }
                        active
                            .engine
                            .as_mut()
                            .and_then(|engine| engine.select_bot_move(seat))
                    };
                    if let Some(mv) = mv {
                        self.apply_move(mv, now);
                    }
                },
                TimerEvent::Engine(action) => {
                    {
                        let Some(active) = self.active.as_mut() else {
                            continue;
                        };
                        let Some(engine) = active.engine.as_mut() else {
                            continue;
                        };
                        engine.resolve(action);
                        active.session.touch();
                    }
                    self.settle(now);
                },
            }
        }
        applied
    }

    /// After an effective engine step: finish the session if the engine
    /// is done, otherwise hand the turn to the bot when it is due one.
    fn settle(&mut self, now: Instant) {
        let generation = self.generation;
        let mut completed = false;
        let mut bot_due = false;
        {
            let Some(active) = self.active.as_mut() else {
                return;
            };
            let Some(engine) = active.engine.as_mut() else {
                return;
            };

            if engine.is_complete() {
                let results = engine.results();
                for result in &results {
                    if let Some(player) = active
                        .session
                        .players
                        .iter_mut()
                        .find(|p| p.id == result.player_id)
                    {
                        player.score = result.score;
                    }
                }
                active.session.winner = results
                    .iter()
                    .find(|r| r.score > 0)
                    .map(|r| r.player_id);
                active.session.status = SessionStatus::Completed;
                active.session.touch();
                tracing::info!(
                    session_id = %active.session.id,
                    winner = ?active.session.winner,
                    "Session completed"
                );
                completed = true;
            } else if active.session.status == SessionStatus::Playing {
                let seat = active.session.current_seat;
                bot_due = active.session.players.get(seat).is_some_and(|p| p.is_bot);
            }
        }

        if completed {
            // Nothing left to fire for this session.
            self.scheduler.clear();
        } else if bot_due {
            self.scheduler.schedule(
                now + self.config.bot_delay(),
                generation,
                TimerEvent::BotMove,
            );
        }
    }

    /// Pause the active session and its engine clock.
    pub fn pause(&mut self) {
        if let Some(active) = self.active.as_mut()
            && active.session.status == SessionStatus::Playing
        {
            active.session.status = SessionStatus::Paused;
            active.session.touch();
            if let Some(engine) = active.engine.as_mut() {
                engine.pause();
            }
        }
    }

    pub fn resume(&mut self) {
        if let Some(active) = self.active.as_mut()
            && active.session.status == SessionStatus::Paused
        {
            active.session.status = SessionStatus::Playing;
            active.session.touch();
            if let Some(engine) = active.engine.as_mut() {
                engine.resume();
            }
        }
    }

    /// Discard the active session. No persistence, no stats write-back;
    /// every outstanding timer for it is invalidated.
    pub fn leave(&mut self) {
        self.discard();
    }

    fn discard(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::info!(session_id = %active.session.id, "Session discarded");
        }
        self.scheduler.clear();
        self.generation += 1;
    }
}
