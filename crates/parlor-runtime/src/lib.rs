//! Session layer for the Parlor portal.
//!
//! Owns the single active play-through: catalog lookup, player seating
//! per mode, move dispatch into the engine behind the session, and
//! every timer (bot answers, deferred pair resolution, the 1 Hz engine
//! heartbeat). All state transitions run synchronously on one logical
//! thread via [`manager::SessionManager::poll`]; the optional
//! [`session_loop`] host adapts that to real time for a front end.

pub mod config;
pub mod error;
pub mod manager;
pub mod registry;
pub mod scheduler;
pub mod session_loop;

pub use config::RuntimeConfig;
pub use error::PortalError;
pub use manager::SessionManager;
pub use registry::EngineRegistry;
pub use session_loop::{SessionBroadcast, SessionCommand, spawn_session_host};
