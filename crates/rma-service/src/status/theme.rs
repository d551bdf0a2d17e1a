//! Visual theme derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

use rma_entity::ticket::RecordType;

use super::{Signals, normalize};

/// Semantic colour category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Completed or closed.
    Success,
    /// Rejected.
    Danger,
    /// In repair.
    Info,
    /// Pending.
    Warning,
    /// Anything else.
    Neutral,
}

impl Theme {
    /// Return the theme as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Neutral => "neutral",
        }
    }

    /// Whether a ticket with this theme still needs work.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Success | Self::Danger)
    }

    /// Sort rank for customer ticket lists: pending first, then in repair,
    /// completed, rejected and everything else.
    pub fn open_rank(&self) -> u8 {
        match self {
            Self::Warning => 1,
            Self::Info => 2,
            Self::Success => 3,
            Self::Danger => 4,
            Self::Neutral => 5,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall ticket theme. Rejection wins over every other signal, since a
/// technician can reject at any stage.
pub fn theme(record_type: RecordType, status: Option<&str>, technical: Option<&str>) -> Theme {
    let signals = Signals::read(record_type, status, technical);
    if signals.rejected {
        Theme::Danger
    } else if signals.completed {
        Theme::Success
    } else if signals.in_repair {
        Theme::Info
    } else if signals.pending {
        Theme::Warning
    } else {
        Theme::Neutral
    }
}

/// Theme of the technical badge alone.
pub fn technical_theme(technical: Option<&str>) -> Theme {
    let tech = normalize(technical);
    if tech.is_empty() {
        Theme::Neutral
    } else if tech.contains("APPROV") {
        Theme::Success
    } else if tech.contains("REJECT") {
        Theme::Danger
    } else if tech.contains("IN REPAIR") || tech.contains("IN-REPAIR") {
        Theme::Info
    } else if tech.contains("PENDING") {
        Theme::Warning
    } else {
        Theme::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repair(status: &str, tech: Option<&str>) -> Theme {
        theme(RecordType::Repair, Some(status), tech)
    }

    #[test]
    fn test_rejection_always_wins() {
        for status in ["pending", "approved", "in-repair", "completed", "rejected", ""] {
            assert_eq!(repair(status, Some("Rejected")), Theme::Danger, "{status}");
        }
        assert_eq!(repair("rejected", None), Theme::Danger);
    }

    #[test]
    fn test_theme_precedence() {
        assert_eq!(repair("completed", Some("In Repair")), Theme::Success);
        assert_eq!(repair("in-repair", Some("Pending")), Theme::Info);
        assert_eq!(repair("pending", None), Theme::Warning);
        assert_eq!(repair("approved", Some("Approved")), Theme::Neutral);
        assert_eq!(theme(RecordType::Repair, None, None), Theme::Neutral);
    }

    #[test]
    fn test_technical_theme() {
        assert_eq!(technical_theme(Some("Approved")), Theme::Success);
        assert_eq!(technical_theme(Some("rejected")), Theme::Danger);
        assert_eq!(technical_theme(Some("In Repair")), Theme::Info);
        assert_eq!(technical_theme(Some("Pending")), Theme::Warning);
        assert_eq!(technical_theme(Some("Completed")), Theme::Neutral);
        assert_eq!(technical_theme(None), Theme::Neutral);
    }

    #[test]
    fn test_open_rank_orders_pending_first() {
        let mut themes = vec![Theme::Neutral, Theme::Danger, Theme::Success, Theme::Info, Theme::Warning];
        themes.sort_by_key(Theme::open_rank);
        assert_eq!(
            themes,
            vec![Theme::Warning, Theme::Info, Theme::Success, Theme::Danger, Theme::Neutral]
        );
    }
}
