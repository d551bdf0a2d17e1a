//! Technician and employee update payloads.

use serde::{Deserialize, Serialize};

use rma_entity::ticket::{TechnicalStatus, TicketPatch};

/// Placeholder employees pick instead of a technician.
pub const UNASSIGNED: &str = "Unassigned";

/// A technician's change to a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianUpdate {
    /// New technical status.
    pub technical_status: Option<TechnicalStatus>,
    /// New technical notes.
    pub technical_notes: Option<String>,
}

impl TechnicianUpdate {
    /// Set the technical status.
    pub fn status(status: TechnicalStatus) -> Self {
        Self {
            technical_status: Some(status),
            technical_notes: None,
        }
    }

    /// Also set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.technical_notes = Some(notes.into());
        self
    }

    /// The store patch for this update.
    pub fn to_patch(&self) -> TicketPatch {
        let mut patch = TicketPatch::default();
        if let Some(status) = self.technical_status {
            patch.technical_status = Some(Some(status.as_str().to_string()));
        }
        if let Some(notes) = &self.technical_notes {
            patch = patch.with_technical_notes(notes.clone());
        }
        patch
    }
}

/// An employee's edit of assignment and warranty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeEdit {
    /// Technician name. `Unassigned` or blank clears the assignment.
    pub assigned_to: Option<String>,
    /// Warranty override.
    pub warranty: Option<bool>,
}

impl EmployeeEdit {
    /// The store patch for this edit.
    pub fn to_patch(&self) -> TicketPatch {
        let assigned_to = self.assigned_to.as_deref().map(|name| {
            let name = name.trim();
            (!name.is_empty() && !name.eq_ignore_ascii_case(UNASSIGNED)).then(|| name.to_string())
        });
        TicketPatch {
            assigned_to,
            warranty: self.warranty,
            ..TicketPatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_is_stored_as_null() {
        let edit = EmployeeEdit {
            assigned_to: Some("Unassigned".to_string()),
            warranty: Some(true),
        };
        let json = serde_json::to_value(edit.to_patch()).expect("serialize");
        assert_eq!(json, serde_json::json!({ "assigned_to": null, "warranty": true }));
    }

    #[test]
    fn test_technician_patch() {
        let patch = TechnicianUpdate::status(TechnicalStatus::InRepair)
            .with_notes("Replaced hinge")
            .to_patch();
        assert_eq!(patch.technical_status, Some(Some("In Repair".to_string())));
        assert_eq!(patch.technical_notes.as_deref(), Some("Replaced hinge"));
        assert!(TechnicianUpdate::default().to_patch().is_empty());
    }
}
