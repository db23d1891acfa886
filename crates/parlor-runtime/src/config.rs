use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing knobs for the session runtime, loaded from `parlor.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Delay before an automated opponent answers (ms).
    pub bot_move_delay_ms: u64,
    /// Interval of the engine heartbeat tick (ms).
    pub heartbeat_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bot_move_delay_ms: 500,
            heartbeat_ms: 1000,
        }
    }
}

impl RuntimeConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("PARLOR_RUNTIME_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/parlor.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }

    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_move_delay_ms)
    }

    pub fn heartbeat(&self) -> Duration {
        Duration::from_millis(self.heartbeat_ms)
    }
}
