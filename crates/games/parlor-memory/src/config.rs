use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Data-driven timing for the memory game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Delay before a matched pair locks in (ms).
    pub match_confirm_ms: u64,
    /// Delay before a mismatched pair flips back down (ms).
    pub mismatch_revert_ms: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            match_confirm_ms: 500,
            mismatch_revert_ms: 1000,
        }
    }
}

impl MemoryConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("PARLOR_MEMORY_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/memory.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }

    pub fn confirm_delay(&self) -> Duration {
        Duration::from_millis(self.match_confirm_ms)
    }

    pub fn revert_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_revert_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_revert_longer_than_confirm() {
        let config = MemoryConfig::default();
        assert!(config.revert_delay() > config.confirm_delay());
    }

    #[test]
    fn toml_overrides_apply() {
        let config: MemoryConfig = toml::from_str("match_confirm_ms = 50").unwrap();
        assert_eq!(config.match_confirm_ms, 50);
        // Unset fields keep their defaults.
        assert_eq!(config.mismatch_revert_ms, 1000);
    }
}
