//! Notification derivation rules: which lifecycle events produce a
//! notification, and what it says.

use chrono::{DateTime, Utc};

use rma_core::config::NotificationConfig;
use rma_core::events::{DomainEvent, TicketEvent};
use rma_entity::notification::{NewNotification, NotificationKind, Role};
use tracing::warn;

use crate::status::normalize;

/// Pure rules turning ticket events into notification payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRules {
    /// Role addressed when the caller does not pick one.
    default_role: Role,
    /// How much of a note is quoted in the message.
    note_preview_chars: usize,
}

impl Default for NotificationRules {
    fn default() -> Self {
        Self::from_config(&NotificationConfig::default())
    }
}

impl NotificationRules {
    /// Creates rules with explicit settings.
    pub fn new(default_role: Role, note_preview_chars: usize) -> Self {
        Self {
            default_role,
            note_preview_chars,
        }
    }

    /// Creates rules from configuration. An unknown role falls back to
    /// `employee`.
    pub fn from_config(config: &NotificationConfig) -> Self {
        let default_role = config.default_role.parse().unwrap_or_else(|_| {
            warn!(role = %config.default_role, "Unknown default notification role, using employee");
            Role::Employee
        });
        Self::new(default_role, config.note_preview_chars)
    }

    /// Role addressed when the caller does not pick one.
    pub fn default_role(&self) -> Role {
        self.default_role
    }

    /// Whether a technical status change deserves a notification.
    ///
    /// Unchanged values never do. Neither does the first assignment of
    /// `Pending` to an untouched ticket, which is the implicit default and
    /// not a change anyone needs to hear about. Clearing the value is not
    /// reported either.
    pub fn is_technical_change_notable(&self, old: Option<&str>, new: Option<&str>) -> bool {
        let old = normalize(old);
        let new = normalize(new);
        if new.is_empty() || old == new {
            return false;
        }
        !(old.is_empty() && new == "PENDING")
    }

    /// Message for a created ticket.
    pub fn created_message(&self, record_type: &str) -> String {
        let record_type = if record_type.trim().is_empty() {
            "repair"
        } else {
            record_type.trim()
        };
        format!("New {record_type} ticket created")
    }

    /// Message for a technical status change.
    pub fn technical_change_message(&self, old: Option<&str>, new: &str) -> String {
        let old = old.map(str::trim).filter(|s| !s.is_empty()).unwrap_or("None");
        format!("Technical status: {old} → {new}")
    }

    /// The note as quoted in a message, cut to the preview length.
    pub fn note_preview(&self, note: &str) -> String {
        if note.chars().count() > self.note_preview_chars {
            let head: String = note.chars().take(self.note_preview_chars).collect();
            format!("{head}...")
        } else {
            note.to_string()
        }
    }

    /// Message for an added technical note.
    pub fn note_message(&self, note: &str) -> String {
        format!("New technical note added: \"{}\"", self.note_preview(note))
    }

    /// Build the notification an event produces, if any.
    pub fn derive(&self, event: &DomainEvent, for_role: Option<Role>) -> Option<NewNotification> {
        let for_role = for_role.unwrap_or(self.default_role);
        let created_at: DateTime<Utc> = event.timestamp;

        let notification = match &event.payload {
            TicketEvent::Created {
                ticket_id,
                rma,
                record_type,
                status,
                technical_status,
            } => NewNotification {
                ticket_id: ticket_id.clone(),
                rma: rma.clone(),
                kind: NotificationKind::Created,
                message: self.created_message(record_type),
                old_status: None,
                new_status: Some(status.clone()),
                old_technical_status: None,
                new_technical_status: non_blank(technical_status.as_deref()),
                technical_note: None,
                for_role,
                created_at,
                read: false,
            },
            TicketEvent::TechnicalStatusChanged {
                ticket_id,
                rma,
                status,
                old_technical_status,
                new_technical_status,
            } => {
                let old = old_technical_status.as_deref();
                let new = new_technical_status.as_deref();
                if !self.is_technical_change_notable(old, new) {
                    return None;
                }
                let new = new.unwrap_or_default().trim();
                NewNotification {
                    ticket_id: ticket_id.clone(),
                    rma: rma.clone(),
                    kind: NotificationKind::TechnicalStatusChange,
                    message: self.technical_change_message(old, new),
                    old_status: Some(status.clone()),
                    new_status: Some(status.clone()),
                    old_technical_status: non_blank(old),
                    new_technical_status: Some(new.to_string()),
                    technical_note: None,
                    for_role,
                    created_at,
                    read: false,
                }
            }
            TicketEvent::TechnicalNoteAdded {
                ticket_id,
                rma,
                status,
                technical_status,
                note,
            } => {
                if note.trim().is_empty() {
                    return None;
                }
                NewNotification {
                    ticket_id: ticket_id.clone(),
                    rma: rma.clone(),
                    kind: NotificationKind::TechnicalNoteAdded,
                    message: self.note_message(note),
                    old_status: Some(status.clone()),
                    new_status: Some(status.clone()),
                    old_technical_status: non_blank(technical_status.as_deref()),
                    new_technical_status: non_blank(technical_status.as_deref()),
                    technical_note: Some(note.clone()),
                    for_role,
                    created_at,
                    read: false,
                }
            }
        };
        Some(notification)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rma_core::types::TicketId;

    fn change(old: Option<&str>, new: Option<&str>) -> DomainEvent {
        DomainEvent::new(
            Utc::now(),
            TicketEvent::TechnicalStatusChanged {
                ticket_id: TicketId::from("7"),
                rma: "RMA-2025-0A1B2C3D".to_string(),
                status: "in-repair".to_string(),
                old_technical_status: old.map(str::to_string),
                new_technical_status: new.map(str::to_string),
            },
        )
    }

    #[test]
    fn test_first_pending_is_suppressed() {
        let rules = NotificationRules::default();
        assert!(rules.derive(&change(None, Some("Pending")), None).is_none());
        assert!(rules.derive(&change(Some(" "), Some("pending")), None).is_none());
    }

    #[test]
    fn test_unchanged_value_is_suppressed() {
        let rules = NotificationRules::default();
        assert!(!rules.is_technical_change_notable(Some("In Repair"), Some("in repair")));
        assert!(!rules.is_technical_change_notable(Some("Approved"), None));
    }

    #[test]
    fn test_real_change_is_reported() {
        let rules = NotificationRules::default();
        let n = rules
            .derive(&change(Some("Pending"), Some("In Repair")), None)
            .expect("notable");
        assert_eq!(n.kind, NotificationKind::TechnicalStatusChange);
        assert_eq!(n.message, "Technical status: Pending → In Repair");
        assert_eq!(n.for_role, Role::Employee);
        assert_eq!(n.old_status.as_deref(), Some("in-repair"));
        assert_eq!(n.new_status.as_deref(), Some("in-repair"));
        assert!(!n.read);
    }

    #[test]
    fn test_first_non_pending_value_reads_none() {
        let rules = NotificationRules::default();
        let n = rules
            .derive(&change(None, Some("Approved")), Some(Role::Manager))
            .expect("notable");
        assert_eq!(n.message, "Technical status: None → Approved");
        assert_eq!(n.old_technical_status, None);
        assert_eq!(n.for_role, Role::Manager);
    }

    #[test]
    fn test_note_preview_truncates_on_chars() {
        let rules = NotificationRules::new(Role::Employee, 5);
        assert_eq!(rules.note_preview("short"), "short");
        assert_eq!(rules.note_preview("αβγδεζη"), "αβγδε...");
        assert_eq!(rules.note_message("replaced"), "New technical note added: \"repla...\"");
    }

    #[test]
    fn test_created_message_defaults_to_repair() {
        let rules = NotificationRules::default();
        assert_eq!(rules.created_message("return"), "New return ticket created");
        assert_eq!(rules.created_message(""), "New repair ticket created");
    }

    #[test]
    fn test_unknown_config_role_falls_back() {
        let config = NotificationConfig {
            default_role: "janitor".to_string(),
            note_preview_chars: 50,
        };
        assert_eq!(NotificationRules::from_config(&config).default_role(), Role::Employee);
    }
}
