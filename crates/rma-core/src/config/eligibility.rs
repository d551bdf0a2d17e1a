//! Warranty and return window configuration.

use serde::{Deserialize, Serialize};

/// Eligibility windows measured from the purchase date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EligibilityConfig {
    /// Repair warranty length in calendar years.
    #[serde(default = "default_warranty_years")]
    pub warranty_years: i32,
    /// Return window length in whole days (inclusive).
    #[serde(default = "default_return_days")]
    pub return_window_days: i64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            warranty_years: default_warranty_years(),
            return_window_days: default_return_days(),
        }
    }
}

fn default_warranty_years() -> i32 {
    2
}

fn default_return_days() -> i64 {
    14
}
