//! Ticket lifecycle events.

use serde::{Deserialize, Serialize};

use crate::types::TicketId;

/// Events related to a ticket's lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TicketEvent {
    /// A ticket was created.
    Created {
        /// The ticket ID.
        ticket_id: TicketId,
        /// The RMA code.
        rma: String,
        /// `repair` or `return`.
        record_type: String,
        /// Customer-facing status at creation.
        status: String,
        /// Technical status at creation (normally unset).
        technical_status: Option<String>,
    },
    /// The technical status of a ticket changed.
    TechnicalStatusChanged {
        /// The ticket ID.
        ticket_id: TicketId,
        /// The RMA code.
        rma: String,
        /// Customer-facing status at the time of the change.
        status: String,
        /// Previous technical status.
        old_technical_status: Option<String>,
        /// New technical status.
        new_technical_status: Option<String>,
    },
    /// A technical note was attached alongside a technical status change.
    TechnicalNoteAdded {
        /// The ticket ID.
        ticket_id: TicketId,
        /// The RMA code.
        rma: String,
        /// Customer-facing status.
        status: String,
        /// Technical status after the update.
        technical_status: Option<String>,
        /// The note text.
        note: String,
    },
}

impl TicketEvent {
    /// The ticket this event refers to.
    pub fn ticket_id(&self) -> &TicketId {
        match self {
            Self::Created { ticket_id, .. }
            | Self::TechnicalStatusChanged { ticket_id, .. }
            | Self::TechnicalNoteAdded { ticket_id, .. } => ticket_id,
        }
    }

    /// The RMA code of the ticket.
    pub fn rma(&self) -> &str {
        match self {
            Self::Created { rma, .. }
            | Self::TechnicalStatusChanged { rma, .. }
            | Self::TechnicalNoteAdded { rma, .. } => rma,
        }
    }
}
