//! Board projection: tickets of one record type grouped into status columns.

use serde::Serialize;

use rma_core::types::TicketId;
use rma_entity::ticket::{RecordType, Ticket, TicketStatus};

/// Whether a ticket matches a free-text search over RMA code, customer name
/// and product name. An empty query matches everything.
pub fn matches_search(ticket: &Ticket, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [
        ticket.rma.as_str(),
        ticket.customer.name.as_str(),
        ticket.product.name.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&query))
}

/// One status column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// The status every card in this column carries.
    #[serde(skip)]
    pub status: TicketStatus,
    /// Stored status token, used as the column key.
    pub key: &'static str,
    /// Heading.
    pub title: &'static str,
    /// Cards, top to bottom.
    pub tickets: Vec<Ticket>,
}

/// A kanban board for one record type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    /// The record type shown.
    pub record_type: RecordType,
    /// Columns in canonical order.
    pub columns: Vec<Column>,
}

impl Board {
    /// Build the board for a record type from the full ticket collection.
    ///
    /// Tickets of the other record type, tickets failing the search and
    /// tickets whose status matches no column are left out.
    pub fn for_record_type(record_type: RecordType, tickets: &[Ticket], search: &str) -> Self {
        let mut columns: Vec<Column> = TicketStatus::columns(record_type)
            .into_iter()
            .map(|status| Column {
                status,
                key: status.as_str(),
                title: status.label(),
                tickets: Vec::new(),
            })
            .collect();

        for ticket in tickets
            .iter()
            .filter(|t| t.record_type == record_type && matches_search(t, search))
        {
            let Some(status) = ticket.ticket_status() else {
                continue;
            };
            if let Some(column) = columns.iter_mut().find(|c| c.status == status) {
                column.tickets.push(ticket.clone());
            }
        }

        Self {
            record_type,
            columns,
        }
    }

    /// Column by key. Aliases such as `pending` on a return board resolve to
    /// their canonical column.
    pub fn column(&self, key: &str) -> Option<&Column> {
        let status = TicketStatus::parse(self.record_type, key)?;
        self.columns.iter().find(|c| c.status == status)
    }

    /// Total number of cards.
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.tickets.len()).sum()
    }

    /// Whether the board has no cards.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column and row of a card.
    pub fn locate(&self, id: &TicketId) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(ci, column)| {
            column
                .tickets
                .iter()
                .position(|t| &t.id == id)
                .map(|row| (ci, row))
        })
    }

    /// The card for a ticket id.
    pub fn ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.locate(id).map(|(ci, row)| &self.columns[ci].tickets[row])
    }

    /// The card carrying an RMA code (case-insensitive).
    pub fn find_by_rma(&self, rma: &str) -> Option<&Ticket> {
        let rma = rma.trim();
        self.columns
            .iter()
            .flat_map(|c| c.tickets.iter())
            .find(|t| t.rma.eq_ignore_ascii_case(rma))
    }

    /// Remove a card, returning it with its former position.
    pub(crate) fn take(&mut self, id: &TicketId) -> Option<(TicketStatus, usize, Ticket)> {
        let (ci, row) = self.locate(id)?;
        let column = &mut self.columns[ci];
        Some((column.status, row, column.tickets.remove(row)))
    }

    /// Insert a card into a status column at `index` (clamped to the end).
    pub(crate) fn place(&mut self, status: TicketStatus, index: usize, ticket: Ticket) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.status == status) {
            let index = index.min(column.tickets.len());
            column.tickets.insert(index, ticket);
        }
    }

    /// Replace a card in place, keeping its position.
    pub(crate) fn replace(&mut self, ticket: Ticket) {
        if let Some((ci, row)) = self.locate(&ticket.id) {
            self.columns[ci].tickets[row] = ticket;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: &str, record_type: &str, status: &str, customer: &str) -> Ticket {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "rma": format!("RMA-2025-0000000{id}"),
            "record_type": record_type,
            "status": status,
            "customer": { "name": customer },
            "product": { "name": "LAP-123" }
        }))
        .expect("ticket")
    }

    #[test]
    fn test_repair_columns_in_order() {
        let board = Board::for_record_type(RecordType::Repair, &[], "");
        let keys: Vec<&str> = board.columns.iter().map(|c| c.key).collect();
        assert_eq!(keys, ["pending", "approved", "in-repair", "completed", "rejected"]);
        assert!(board.is_empty());
    }

    #[test]
    fn test_return_requested_holds_pending() {
        let tickets = vec![
            ticket("1", "return", "pending", "Anna"),
            ticket("2", "return", "requested", "Nikos"),
            ticket("3", "repair", "pending", "Eleni"),
        ];
        let board = Board::for_record_type(RecordType::Return, &tickets, "");
        let requested = board.column("requested").expect("column");
        assert_eq!(requested.tickets.len(), 2);
        assert_eq!(board.column("pending").map(|c| c.key), Some("requested"));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let tickets = vec![
            ticket("1", "repair", "pending", "Anna Georgiou"),
            ticket("2", "repair", "approved", "Nikos"),
        ];
        let board = Board::for_record_type(RecordType::Repair, &tickets, "  ANNA ");
        assert_eq!(board.len(), 1);
        let board = Board::for_record_type(RecordType::Repair, &tickets, "rma-2025-00000002");
        assert_eq!(board.len(), 1);
        assert!(board.find_by_rma("rma-2025-00000002").is_some());
    }

    #[test]
    fn test_unknown_status_is_left_off() {
        let tickets = vec![ticket("1", "repair", "refunded", "Anna")];
        let board = Board::for_record_type(RecordType::Repair, &tickets, "");
        assert!(board.is_empty());
    }
}
