//! Drag-and-drop transitions.
//!
//! A drop is planned as a pure function of the ticket and the request, then
//! applied optimistically to the local board before the store confirms. A
//! rejected write puts the card back exactly where it was.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use rma_core::error::AppError;
use rma_core::result::AppResult;
use rma_core::traits::Clock;
use rma_core::types::TicketId;
use rma_entity::ticket::{
    RecordType, RepairStatus, TechnicalStatus, Ticket, TicketPatch, TicketStatus,
};
use rma_store::TicketStore;

use super::board::Board;
use crate::context::ActorContext;
use crate::notification::NotificationEngine;

/// A card dropped on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragRequest {
    /// The ticket being moved.
    pub ticket_id: TicketId,
    /// Column the card was picked up from.
    pub source: String,
    /// Row it was picked up from.
    pub source_index: usize,
    /// Column it was dropped on. `None` when dropped outside the board.
    pub destination: Option<String>,
    /// Row it was dropped at.
    pub destination_index: usize,
}

impl DragRequest {
    /// A move to the top of another column.
    pub fn to_column(ticket_id: TicketId, source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            ticket_id,
            source: source.into(),
            source_index: 0,
            destination: Some(destination.into()),
            destination_index: 0,
        }
    }
}

/// What a drop amounts to.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionPlan {
    /// Dropped where it started, or outside the board.
    Unchanged,
    /// Moved within its column. Row order is local only.
    Reorder {
        /// New row.
        index: usize,
    },
    /// Moved to another status.
    Move {
        /// Status before the move.
        from: TicketStatus,
        /// Status after the move.
        to: TicketStatus,
        /// Fields to write.
        patch: TicketPatch,
    },
}

impl TransitionPlan {
    /// Whether the plan writes to the store.
    pub fn writes(&self) -> bool {
        matches!(self, Self::Move { .. })
    }
}

fn column_status(record_type: RecordType, key: &str) -> AppResult<TicketStatus> {
    TicketStatus::parse(record_type, key).ok_or_else(|| {
        AppError::validation(format!(
            "'{key}' is not a {record_type} column"
        ))
    })
}

/// Plan a drop for a ticket.
///
/// Moving a repair ticket into `in-repair` seeds its technical workflow
/// with `Pending` unless the technical status is still in flight
/// (`Pending`, `Approved` or `In Repair`). A closed or unrecognised value is
/// stale and gets reseeded. Every other move leaves the technical status
/// untouched.
pub fn plan_transition(ticket: &Ticket, request: &DragRequest) -> AppResult<TransitionPlan> {
    let Some(destination) = request.destination.as_deref() else {
        return Ok(TransitionPlan::Unchanged);
    };

    let record_type = ticket.record_type;
    let from = column_status(record_type, &request.source)?;
    let to = column_status(record_type, destination)?;

    if from == to {
        if request.source_index == request.destination_index {
            return Ok(TransitionPlan::Unchanged);
        }
        return Ok(TransitionPlan::Reorder {
            index: request.destination_index,
        });
    }

    let mut patch = TicketPatch::status(to.as_str());
    let in_flight = ticket.technical().is_some_and(|t| t.is_in_flight());
    if to == TicketStatus::Repair(RepairStatus::InRepair) && !in_flight {
        patch = patch.with_technical_status(Some(TechnicalStatus::Pending.as_str().to_string()));
    }

    Ok(TransitionPlan::Move { from, to, patch })
}

/// Applies kanban drops to a board and the ticket store.
#[derive(Debug, Clone)]
pub struct KanbanController {
    /// Ticket store.
    tickets: Arc<dyn TicketStore>,
    /// Notification engine.
    notifications: NotificationEngine,
    /// Timestamp source for writes.
    clock: Arc<dyn Clock>,
}

impl KanbanController {
    /// Creates a new kanban controller.
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        notifications: NotificationEngine,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tickets,
            notifications,
            clock,
        }
    }

    /// Load a fresh board.
    pub async fn load(&self, record_type: RecordType, search: &str) -> AppResult<Board> {
        let tickets = self.tickets.list().await?;
        Ok(Board::for_record_type(record_type, &tickets, search))
    }

    /// Apply a drop.
    ///
    /// The board shows the move before the store write. If the write fails
    /// the card returns to its source position with its previous fields and
    /// the error is returned for display.
    pub async fn drop_card(
        &self,
        board: &mut Board,
        request: &DragRequest,
        actor: &ActorContext,
    ) -> AppResult<TransitionPlan> {
        let ticket = board
            .ticket(&request.ticket_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Ticket {} is not on the board", request.ticket_id)))?;

        let plan = plan_transition(&ticket, request)?;
        let (to, patch) = match &plan {
            TransitionPlan::Unchanged => return Ok(plan),
            TransitionPlan::Reorder { index } => {
                if let Some((status, _, card)) = board.take(&ticket.id) {
                    board.place(status, *index, card);
                }
                return Ok(plan);
            }
            TransitionPlan::Move { to, patch, .. } => (*to, patch.clone()),
        };

        let Some((source_status, source_row, original)) = board.take(&ticket.id) else {
            return Err(AppError::not_found(format!("Ticket {} is not on the board", ticket.id)));
        };
        let mut optimistic = original.clone();
        patch.apply_to(&mut optimistic);
        board.place(to, request.destination_index, optimistic);

        let patch = patch.stamped(self.clock.now());
        match self.tickets.update(&ticket.id, &patch).await {
            Ok(updated) => {
                info!(
                    rma = %updated.rma,
                    from = %source_status,
                    to = %to,
                    role = %actor.role,
                    "Ticket moved"
                );
                board.replace(updated.clone());
                if updated.technical_status != original.technical_status {
                    self.notifications
                        .notify_technical_status_change(
                            &updated,
                            original.technical_status.as_deref(),
                            updated.technical_status.as_deref(),
                            None,
                        )
                        .await;
                }
                Ok(plan)
            }
            Err(e) => {
                warn!(
                    rma = %original.rma,
                    from = %source_status,
                    to = %to,
                    error = %e,
                    "Ticket move rejected, rolling back"
                );
                board.take(&ticket.id);
                board.place(source_status, source_row, original);
                Err(e)
            }
        }
    }

    /// Move a ticket, found by RMA code or id, to another column.
    pub async fn move_to(
        &self,
        record_type: RecordType,
        rma_or_id: &str,
        destination: &str,
        actor: &ActorContext,
    ) -> AppResult<Ticket> {
        let mut board = self.load(record_type, "").await?;
        let ticket = board
            .find_by_rma(rma_or_id)
            .or_else(|| board.ticket(&TicketId::from(rma_or_id)))
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("No {record_type} ticket '{rma_or_id}' on the board")))?;

        let (ci, row) = board
            .locate(&ticket.id)
            .ok_or_else(|| AppError::not_found(format!("Ticket {} is not on the board", ticket.id)))?;
        let request = DragRequest {
            ticket_id: ticket.id.clone(),
            source: board.columns[ci].key.to_string(),
            source_index: row,
            destination: Some(destination.to_string()),
            destination_index: 0,
        };

        self.drop_card(&mut board, &request, actor).await?;
        board
            .ticket(&ticket.id)
            .cloned()
            .ok_or_else(|| AppError::internal(format!("Ticket {} vanished from the board", ticket.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(status: &str, technical: Option<&str>) -> Ticket {
        serde_json::from_value(serde_json::json!({
            "id": "9",
            "rma": "RMA-2025-0A1B2C3D",
            "record_type": "repair",
            "status": status,
            "technical_status": technical
        }))
        .expect("ticket")
    }

    fn drag(from: &str, to: Option<&str>, from_index: usize, to_index: usize) -> DragRequest {
        DragRequest {
            ticket_id: TicketId::from("9"),
            source: from.to_string(),
            source_index: from_index,
            destination: to.map(str::to_string),
            destination_index: to_index,
        }
    }

    #[test]
    fn test_into_in_repair_seeds_pending() {
        let plan = plan_transition(&ticket("approved", None), &drag("approved", Some("in-repair"), 0, 0))
            .expect("plan");
        let TransitionPlan::Move { patch, .. } = plan else {
            panic!("expected a move");
        };
        assert_eq!(patch.status.as_deref(), Some("in-repair"));
        assert_eq!(patch.technical_status, Some(Some("Pending".to_string())));
    }

    #[test]
    fn test_into_in_repair_keeps_meaningful_technical_status() {
        let plan = plan_transition(
            &ticket("approved", Some("Approved")),
            &drag("approved", Some("in-repair"), 0, 0),
        )
        .expect("plan");
        let TransitionPlan::Move { patch, .. } = plan else {
            panic!("expected a move");
        };
        assert_eq!(patch.technical_status, None);
    }

    #[test]
    fn test_stale_technical_status_is_reseeded() {
        let plan = plan_transition(
            &ticket("pending", Some("waiting on parts")),
            &drag("pending", Some("in-repair"), 0, 0),
        )
        .expect("plan");
        let TransitionPlan::Move { patch, .. } = plan else {
            panic!("expected a move");
        };
        assert_eq!(patch.technical_status, Some(Some("Pending".to_string())));
    }

    #[test]
    fn test_closed_technical_status_is_reseeded() {
        for closed in ["Completed", "Rejected"] {
            let plan = plan_transition(
                &ticket("completed", Some(closed)),
                &drag("completed", Some("in-repair"), 0, 0),
            )
            .expect("plan");
            let TransitionPlan::Move { patch, .. } = plan else {
                panic!("expected a move");
            };
            assert_eq!(patch.status.as_deref(), Some("in-repair"));
            assert_eq!(patch.technical_status, Some(Some("Pending".to_string())), "{closed}");
        }
    }

    #[test]
    fn test_other_moves_leave_technical_status() {
        let plan = plan_transition(&ticket("in-repair", None), &drag("in-repair", Some("completed"), 0, 0))
            .expect("plan");
        let TransitionPlan::Move { patch, .. } = plan else {
            panic!("expected a move");
        };
        assert_eq!(patch.technical_status, None);
    }

    #[test]
    fn test_same_column_is_not_a_write() {
        let t = ticket("approved", None);
        assert_eq!(
            plan_transition(&t, &drag("approved", Some("approved"), 1, 1)).expect("plan"),
            TransitionPlan::Unchanged
        );
        let reorder = plan_transition(&t, &drag("approved", Some("approved"), 1, 0)).expect("plan");
        assert_eq!(reorder, TransitionPlan::Reorder { index: 0 });
        assert!(!reorder.writes());
        assert_eq!(
            plan_transition(&t, &drag("approved", None, 1, 0)).expect("plan"),
            TransitionPlan::Unchanged
        );
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let err = plan_transition(&ticket("approved", None), &drag("approved", Some("refunded"), 0, 0))
            .expect_err("not a repair column");
        assert_eq!(err.kind, rma_core::error::ErrorKind::Validation);
    }
}
