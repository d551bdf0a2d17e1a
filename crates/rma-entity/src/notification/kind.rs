//! Notification type enumeration.

use serde::{Deserialize, Serialize};

/// Lifecycle transition a notification was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A ticket was created.
    Created,
    /// A ticket's technical status changed.
    TechnicalStatusChange,
    /// A technical note was added.
    TechnicalNoteAdded,
}

impl NotificationKind {
    /// Return the kind as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::TechnicalStatusChange => "technical_status_change",
            Self::TechnicalNoteAdded => "technical_note_added",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
