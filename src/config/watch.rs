//! `[watch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [watch]
//! enabled = true               # false disables polling entirely
//! polling_interval_ms = 1500   # timer period, clamped to [500, 10000]
//! suppression_window_ms = 3000 # self-trigger window, clamped to [500, 30000]
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const MIN_POLLING_INTERVAL_MS: u64 = 500;
pub const MAX_POLLING_INTERVAL_MS: u64 = 10_000;
pub const MIN_SUPPRESSION_WINDOW_MS: u64 = 500;
pub const MAX_SUPPRESSION_WINDOW_MS: u64 = 30_000;

/// Watch-mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Master switch. When false, polling never starts.
    pub enabled: bool,

    /// Timer period in milliseconds.
    pub polling_interval_ms: u64,

    /// How long a document ignores further signal changes after an edit
    /// was applied to it. The edit itself may touch the file; without the
    /// window that shows up as a fresh external change and loops forever.
    pub suppression_window_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            polling_interval_ms: 1500,
            suppression_window_ms: 3000,
        }
    }
}

impl WatchConfig {
    /// Clamp out-of-range values, logging a hint for each adjustment.
    pub fn clamp_with_hints(&mut self) {
        let clamped = self
            .polling_interval_ms
            .clamp(MIN_POLLING_INTERVAL_MS, MAX_POLLING_INTERVAL_MS);
        if clamped != self.polling_interval_ms {
            crate::log!("config"; "polling_interval_ms {} out of range, using {}",
                self.polling_interval_ms, clamped);
            self.polling_interval_ms = clamped;
        }

        let clamped = self
            .suppression_window_ms
            .clamp(MIN_SUPPRESSION_WINDOW_MS, MAX_SUPPRESSION_WINDOW_MS);
        if clamped != self.suppression_window_ms {
            crate::log!("config"; "suppression_window_ms {} out of range, using {}",
                self.suppression_window_ms, clamped);
            self.suppression_window_ms = clamped;
        }
    }

    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms)
    }

    pub fn suppression_window(&self) -> Duration {
        Duration::from_millis(self.suppression_window_ms)
    }
}
