//! Ticket priority enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Triage priority. New tickets start at [`Priority::Low`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Default priority.
    #[default]
    #[serde(alias = "low", alias = "LOW")]
    Low,
    /// Medium priority.
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    /// High priority.
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl Priority {
    /// Return the priority as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
