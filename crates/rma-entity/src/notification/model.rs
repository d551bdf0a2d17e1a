//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rma_core::types::{NotificationId, TicketId};

use super::kind::NotificationKind;
use super::role::Role;

/// A notification derived from a ticket lifecycle transition.
///
/// Mutated only by flipping `read`. Ordering is by `created_at`, never by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Store-assigned identifier.
    pub id: NotificationId,
    /// The ticket this notification is about.
    pub ticket_id: TicketId,
    /// RMA code of the ticket.
    pub rma: String,
    /// What happened.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Display message.
    pub message: String,
    /// Customer status before the transition.
    #[serde(default)]
    pub old_status: Option<String>,
    /// Customer status after the transition.
    #[serde(default)]
    pub new_status: Option<String>,
    /// Technical status before the transition.
    #[serde(default)]
    pub old_technical_status: Option<String>,
    /// Technical status after the transition.
    #[serde(default)]
    pub new_technical_status: Option<String>,
    /// Note text for `technical_note_added`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_note: Option<String>,
    /// Role whose feed this notification belongs to.
    pub for_role: Role,
    /// When the notification was recorded.
    pub created_at: DateTime<Utc>,
    /// Whether it has been read.
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

/// Payload for recording a notification. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    /// The ticket this notification is about.
    pub ticket_id: TicketId,
    /// RMA code of the ticket.
    pub rma: String,
    /// What happened.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Display message.
    pub message: String,
    /// Customer status before the transition.
    pub old_status: Option<String>,
    /// Customer status after the transition.
    pub new_status: Option<String>,
    /// Technical status before the transition.
    pub old_technical_status: Option<String>,
    /// Technical status after the transition.
    pub new_technical_status: Option<String>,
    /// Note text for `technical_note_added`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_note: Option<String>,
    /// Addressed role.
    pub for_role: Role,
    /// Record time.
    pub created_at: DateTime<Utc>,
    /// Always `false` on creation.
    pub read: bool,
}

impl NewNotification {
    /// Materialise the record the store would hold under `id`.
    pub fn into_notification(self, id: NotificationId) -> Notification {
        Notification {
            id,
            ticket_id: self.ticket_id,
            rma: self.rma,
            kind: self.kind,
            message: self.message,
            old_status: self.old_status,
            new_status: self.new_status,
            old_technical_status: self.old_technical_status,
            new_technical_status: self.new_technical_status,
            technical_note: self.technical_note,
            for_role: self.for_role,
            created_at: self.created_at,
            read: self.read,
        }
    }
}
