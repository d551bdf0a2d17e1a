//! Integration tests for kanban transitions.

mod helpers;

use rma_core::error::ErrorKind;
use rma_entity::notification::{NotificationKind, Role};
use rma_entity::ticket::{RecordType, TechnicalStatus};
use rma_service::ticket::TechnicianUpdate;
use rma_service::{ActorContext, DragRequest, StatusView, Theme, TransitionPlan};
use rma_store::TicketStore;

fn drag(board: &rma_service::Board, rma: &str, to: &str) -> DragRequest {
    let ticket = board.find_by_rma(rma).expect("card on board");
    let (ci, row) = board.locate(&ticket.id).expect("located");
    DragRequest {
        ticket_id: ticket.id.clone(),
        source: board.columns[ci].key.to_string(),
        source_index: row,
        destination: Some(to.to_string()),
        destination_index: 0,
    }
}

#[tokio::test]
async fn test_drag_into_in_repair_seeds_pending_without_notifying() {
    let app = helpers::TestApp::new();
    let ticket = app.submit_repair(5).await;
    let before = app.notifications.len().await;

    let mut board = app.kanban.load(RecordType::Repair, "").await.expect("board");
    let request = drag(&board, &ticket.rma, "in-repair");
    let plan = app
        .kanban
        .drop_card(&mut board, &request, &ActorContext::employee())
        .await
        .expect("move");
    assert!(plan.writes());

    let stored = app.tickets.find_by_id(&ticket.id).await.expect("get").expect("present");
    assert_eq!(stored.status, "in-repair");
    assert_eq!(stored.technical_status.as_deref(), Some("Pending"));
    assert_eq!(stored.last_updated, Some(app.clock_now()));

    let column = board.column("in-repair").expect("column");
    assert_eq!(column.tickets.len(), 1);
    assert_eq!(column.tickets[0].technical_status.as_deref(), Some("Pending"));

    // None -> Pending is the implicit default and is not announced.
    assert_eq!(app.notifications.len().await, before);
}

#[tokio::test]
async fn test_same_column_drop_is_a_no_op() {
    let app = helpers::TestApp::new();
    let ticket = app.submit_repair(5).await;
    app.kanban
        .move_to(RecordType::Repair, &ticket.rma, "approved", &ActorContext::employee())
        .await
        .expect("approve");
    let before = app.tickets.find_by_id(&ticket.id).await.expect("get").expect("present");

    let mut board = app.kanban.load(RecordType::Repair, "").await.expect("board");
    let request = drag(&board, &ticket.rma, "approved");
    let plan = app
        .kanban
        .drop_card(&mut board, &request, &ActorContext::employee())
        .await
        .expect("drop");
    assert_eq!(plan, TransitionPlan::Unchanged);

    let after = app.tickets.find_by_id(&ticket.id).await.expect("get").expect("present");
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_rejected_write_rolls_back() {
    let app = helpers::TestApp::new();
    let ticket = app.submit_repair(5).await;
    let mut board = app.kanban.load(RecordType::Repair, "").await.expect("board");
    let snapshot = board.clone();

    app.tickets.reject_writes(true);
    let request = drag(&board, &ticket.rma, "in-repair");
    let err = app
        .kanban
        .drop_card(&mut board, &request, &ActorContext::employee())
        .await
        .expect_err("store rejects");
    assert_eq!(err.kind, ErrorKind::Store);

    assert_eq!(board, snapshot);
    let stored = app.tickets.find_by_id(&ticket.id).await.expect("get").expect("present");
    assert_eq!(stored.status, "pending");
    assert_eq!(stored.technical_status, None);
}

#[tokio::test]
async fn test_move_keeps_technician_progress() {
    let app = helpers::TestApp::new();
    let ticket = app.submit_repair(5).await;
    app.service
        .technician_update(
            &ticket.id,
            &TechnicianUpdate::status(TechnicalStatus::Approved),
            &ActorContext::technician(),
        )
        .await
        .expect("approve");

    let moved = app
        .kanban
        .move_to(RecordType::Repair, &ticket.rma, "in-repair", &ActorContext::employee())
        .await
        .expect("move");
    assert_eq!(moved.status, "in-repair");
    assert_eq!(moved.technical_status.as_deref(), Some("Approved"));
}

#[tokio::test]
async fn test_reopened_repair_is_reseeded_to_pending() {
    let app = helpers::TestApp::new();
    let ticket = app.submit_repair(5).await;
    app.kanban
        .move_to(RecordType::Repair, &ticket.rma, "completed", &ActorContext::employee())
        .await
        .expect("complete");
    app.service
        .technician_update(
            &ticket.id,
            &TechnicianUpdate::status(TechnicalStatus::Completed),
            &ActorContext::technician(),
        )
        .await
        .expect("technician done");

    let reopened = app
        .kanban
        .move_to(RecordType::Repair, &ticket.rma, "in-repair", &ActorContext::employee())
        .await
        .expect("reopen");
    assert_eq!(reopened.status, "in-repair");
    assert_eq!(reopened.technical_status.as_deref(), Some("Pending"));

    let view = StatusView::of(&reopened);
    assert_eq!(view.stage_index, 2);
    assert_eq!(view.theme, Theme::Info);
}

#[tokio::test]
async fn test_move_out_of_pending_technical_is_announced_once() {
    let app = helpers::TestApp::new();
    let ticket = app.submit_repair(5).await;
    app.kanban
        .move_to(RecordType::Repair, &ticket.rma, "in-repair", &ActorContext::employee())
        .await
        .expect("into repair");
    app.service
        .technician_update(
            &ticket.id,
            &TechnicianUpdate::status(TechnicalStatus::Completed),
            &ActorContext::technician(),
        )
        .await
        .expect("complete");

    let changes: Vec<_> = app
        .engine
        .unread_for(Role::Employee)
        .await
        .expect("feed")
        .into_iter()
        .filter(|n| n.kind == NotificationKind::TechnicalStatusChange)
        .collect();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].message, "Technical status: Pending → Completed");
}

#[tokio::test]
async fn test_return_board_accepts_pending_alias() {
    let app = helpers::TestApp::new();
    let outcome = app
        .service
        .submit(&helpers::return_form(3), None, false, &ActorContext::customer())
        .await
        .expect("submit");

    let moved = app
        .kanban
        .move_to(RecordType::Return, &outcome.ticket.rma, "received", &ActorContext::employee())
        .await
        .expect("receive");
    assert_eq!(moved.status, "received");
    assert_eq!(moved.technical_status, None);

    let err = app
        .kanban
        .move_to(RecordType::Return, &outcome.ticket.rma, "in-repair", &ActorContext::employee())
        .await
        .expect_err("not a return column");
    assert_eq!(err.kind, ErrorKind::Validation);
}
