//! Refresh polling configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shortest allowed refresh interval.
const MIN_INTERVAL_SECONDS: u64 = 5;
/// Longest allowed refresh interval.
const MAX_INTERVAL_SECONDS: u64 = 30;

/// Polling is the only convergence mechanism between clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Interval in seconds between refreshes.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval(),
        }
    }
}

impl PollingConfig {
    /// The effective refresh interval, clamped to 5..=30 seconds.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(
            self.interval_seconds
                .clamp(MIN_INTERVAL_SECONDS, MAX_INTERVAL_SECONDS),
        )
    }
}

fn default_interval() -> u64 {
    10
}
