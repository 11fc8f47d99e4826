//! Engine configuration.

use std::env;
use std::time::Duration;

use crate::types::TICK_MS;

/// Gravity and seeding options for a [`crate::GameDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Period between gravity ticks
    pub tick_period: Duration,
    /// Fixed piece seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(TICK_MS),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    ///
    /// - `PET_TETRIS_TICK_MS`: tick period in milliseconds (default 800, zero ignored)
    /// - `PET_TETRIS_SEED`: piece seed (default: entropy)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tick_ms = lookup("PET_TETRIS_TICK_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(TICK_MS);

        let seed = lookup("PET_TETRIS_SEED").and_then(|s| s.trim().parse::<u64>().ok());

        Self {
            tick_period: Duration::from_millis(tick_ms),
            seed,
        }
    }

    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }
}
