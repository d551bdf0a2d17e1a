//! Ticket entity model and write payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use rma_core::types::TicketId;

use super::priority::Priority;
use super::status::{RecordType, TechnicalStatus, TicketStatus};
use crate::timestamp;

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Placeholder stored by some clients instead of a null assignee.
const UNASSIGNED: &str = "Unassigned";

/// The customer who filed a ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Full name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// The product a ticket is about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product name or code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Product category (Laptop, TV, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A repair or return request as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Store-assigned identifier.
    pub id: TicketId,
    /// Human-readable RMA code. Unique and never regenerated.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rma: String,
    /// Customer details.
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer: Customer,
    /// Customer email.
    #[serde(default)]
    pub email: Option<String>,
    /// Customer phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Purchase date as entered (`YYYY-MM-DD`).
    #[serde(default)]
    pub purchase_date: Option<String>,
    /// Customer postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Product details.
    #[serde(default, deserialize_with = "null_as_default")]
    pub product: Product,
    /// Repair or return. Immutable after creation.
    #[serde(default, deserialize_with = "null_as_default")]
    pub record_type: RecordType,
    /// Customer-facing status, raw as stored (empty when absent).
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Technician workflow status, raw as stored. `None` until first touched.
    #[serde(default)]
    pub technical_status: Option<String>,
    /// Technician notes.
    #[serde(default)]
    pub technical_notes: Option<String>,
    /// Warranty verdict frozen at submission, editable by employees.
    #[serde(default, deserialize_with = "null_as_default")]
    pub warranty: bool,
    /// Triage priority.
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    /// Assigned technician name.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Issue description from the customer.
    #[serde(default)]
    pub issue: Option<String>,
    /// Free-form employee notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Account owner.
    #[serde(default)]
    pub owner: Option<String>,
    /// Product serial number.
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Store where the product was bought.
    #[serde(default)]
    pub store: Option<String>,
    /// URL of an uploaded photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Creation timestamp.
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Refreshed on every mutating write.
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<DateTime<Utc>>,
    /// Legacy date field written by older clients.
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Customer status interpreted against the record type.
    pub fn ticket_status(&self) -> Option<TicketStatus> {
        TicketStatus::parse(self.record_type, &self.status)
    }

    /// Technical status, if set and recognised.
    pub fn technical(&self) -> Option<TechnicalStatus> {
        self.technical_status
            .as_deref()
            .and_then(TechnicalStatus::parse)
    }

    /// Whether a technician has touched this ticket.
    pub fn has_technical_status(&self) -> bool {
        self.technical_status
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// Assigned technician, treating blank and `Unassigned` as none.
    pub fn assignee(&self) -> Option<&str> {
        self.assigned_to
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(UNASSIGNED))
    }

    /// Best-available timestamp for ordering by age: `created_at`, then
    /// `last_updated`, then the legacy `date`.
    pub fn best_timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.last_updated).or(self.date)
    }

    /// Best-available timestamp for ordering by recency: `last_updated`,
    /// then `created_at`, then `date`.
    pub fn updated_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_updated.or(self.created_at).or(self.date)
    }
}

/// Payload for creating a ticket. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTicket {
    /// RMA code.
    pub rma: String,
    /// Customer details.
    pub customer: Customer,
    /// Customer email.
    pub email: String,
    /// Customer phone number.
    pub phone: String,
    /// Purchase date as entered.
    pub purchase_date: String,
    /// Customer postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Product details.
    pub product: Product,
    /// Repair or return.
    pub record_type: RecordType,
    /// Initial customer status.
    pub status: String,
    /// Issue description.
    pub issue: String,
    /// Warranty verdict at submission.
    pub warranty: bool,
    /// Initial priority.
    pub priority: Priority,
    /// Store where the product was bought.
    pub store: String,
    /// URL of an uploaded photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Same as `created_at` on creation.
    pub last_updated: DateTime<Utc>,
}

impl NewTicket {
    /// Materialise the record the store would hold under `id`.
    pub fn into_ticket(self, id: TicketId) -> Ticket {
        Ticket {
            id,
            rma: self.rma,
            customer: self.customer,
            email: Some(self.email),
            phone: Some(self.phone),
            purchase_date: Some(self.purchase_date),
            address: self.address,
            product: self.product,
            record_type: self.record_type,
            status: self.status,
            technical_status: None,
            technical_notes: None,
            warranty: self.warranty,
            priority: self.priority,
            assigned_to: None,
            issue: Some(self.issue),
            notes: None,
            owner: None,
            serial_number: None,
            store: Some(self.store),
            photo_url: self.photo_url,
            created_at: Some(self.created_at),
            last_updated: Some(self.last_updated),
            date: None,
        }
    }
}

/// Partial ticket update sent as a PATCH body.
///
/// Double options distinguish "leave unchanged" (`None`) from "clear"
/// (`Some(None)`, serialized as JSON `null`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketPatch {
    /// New customer status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New technical status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_status: Option<Option<String>>,
    /// New technical notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_notes: Option<String>,
    /// New warranty flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty: Option<bool>,
    /// New assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Option<String>>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Write timestamp. Always set by the ticket service before sending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl TicketPatch {
    /// Patch that sets the customer status.
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// Also set the technical status.
    pub fn with_technical_status(mut self, technical: Option<String>) -> Self {
        self.technical_status = Some(technical);
        self
    }

    /// Also set the technical notes.
    pub fn with_technical_notes(mut self, notes: impl Into<String>) -> Self {
        self.technical_notes = Some(notes.into());
        self
    }

    /// Stamp the write time.
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        self.last_updated = Some(now);
        self
    }

    /// Whether the patch changes no ticket field (ignoring the timestamp).
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.technical_status.is_none()
            && self.technical_notes.is_none()
            && self.warranty.is_none()
            && self.assigned_to.is_none()
            && self.priority.is_none()
    }

    /// Apply the patch to a local copy of the ticket.
    pub fn apply_to(&self, ticket: &mut Ticket) {
        if let Some(status) = &self.status {
            ticket.status = status.clone();
        }
        if let Some(technical) = &self.technical_status {
            ticket.technical_status = technical.clone();
        }
        if let Some(notes) = &self.technical_notes {
            ticket.technical_notes = Some(notes.clone());
        }
        if let Some(warranty) = self.warranty {
            ticket.warranty = warranty;
        }
        if let Some(assigned) = &self.assigned_to {
            ticket.assigned_to = assigned.clone();
        }
        if let Some(priority) = self.priority {
            ticket.priority = priority;
        }
        if let Some(now) = self.last_updated {
            ticket.last_updated = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_record_deserializes() {
        let ticket: Ticket = serde_json::from_value(serde_json::json!({
            "id": 3,
            "rma": "RMA-2025-0A1B2C3D",
            "customer": null,
            "status": "pending",
            "technical_status": null,
            "created_at": "not a date"
        }))
        .expect("sparse ticket");

        assert_eq!(ticket.id.as_str(), "3");
        assert_eq!(ticket.customer.name, "");
        assert_eq!(ticket.record_type, RecordType::Repair);
        assert_eq!(ticket.priority, Priority::Low);
        assert!(ticket.created_at.is_none());
        assert!(!ticket.has_technical_status());
    }

    #[test]
    fn test_assignee_ignores_placeholder() {
        let mut ticket: Ticket =
            serde_json::from_value(serde_json::json!({ "id": "t1", "assigned_to": "Unassigned" }))
                .expect("ticket");
        assert_eq!(ticket.assignee(), None);
        ticket.assigned_to = Some("Tech One".to_string());
        assert_eq!(ticket.assignee(), Some("Tech One"));
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = TicketPatch::status("in-repair").with_technical_status(None);
        let json = serde_json::to_value(&patch).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "status": "in-repair", "technical_status": null })
        );
        assert!(!patch.is_empty());
        assert!(TicketPatch::default().is_empty());
    }
}
