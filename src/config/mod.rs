pub mod loader;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::game::{AUTO_DESCENT_MS, BLINK_MS, TICK_MS};

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub timing: TimingConfig,
}

/// Timer periods for the two session triggers plus the row-clear highlight.
/// Exact values are tunable; the contract only requires the auto-descent
/// period to stay materially longer than the tick period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingConfig {
    pub auto_descent_ms: u64,
    pub tick_ms: u64,
    pub blink_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            auto_descent_ms: AUTO_DESCENT_MS,
            tick_ms: TICK_MS,
            blink_ms: BLINK_MS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
        }
    }
}

impl Config {
    /// Clamps nonsense timing back to defaults. The descent period must
    /// exceed the tick period or the lock/cleanup loop would outpace
    /// gravity.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let defaults = TimingConfig::default();
        if self.timing.tick_ms == 0 {
            log::warn!("tick_ms must be nonzero, using default");
            self.timing.tick_ms = defaults.tick_ms;
        }
        if self.timing.auto_descent_ms <= self.timing.tick_ms {
            log::warn!(
                "auto_descent_ms ({}) must exceed tick_ms ({}), using defaults",
                self.timing.auto_descent_ms,
                self.timing.tick_ms
            );
            self.timing.auto_descent_ms = defaults.auto_descent_ms.max(self.timing.tick_ms * 2);
        }
        self
    }

    /// Replaces the global config with whatever the loader finds on disk.
    pub fn force_reload() -> bool {
        if let Ok(new_config) = loader::load_config_from_file() {
            let mut config = CONFIG.write().unwrap();
            *config = new_config;
            true
        } else {
            false
        }
    }

    /// Snapshot of the current global config.
    #[must_use]
    pub fn current() -> Config {
        CONFIG.read().unwrap().clone()
    }
}
