//! Notification recording and role feeds.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use rma_core::config::NotificationConfig;
use rma_core::error::{AppError, ErrorKind, FieldErrors};
use rma_core::events::{DomainEvent, TicketEvent};
use rma_core::result::AppResult;
use rma_core::traits::Clock;
use rma_core::types::NotificationId;
use rma_entity::notification::{Notification, Role};
use rma_entity::ticket::Ticket;
use rma_store::{NotificationQuery, NotificationStore};

use super::rules::NotificationRules;

/// Records notifications for ticket lifecycle events and serves the
/// per-role feeds.
///
/// Recording never fails the caller: a store error is logged and the
/// triggering ticket write stands.
#[derive(Debug, Clone)]
pub struct NotificationEngine {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
    /// Derivation rules.
    rules: NotificationRules,
    /// Timestamp source for new notifications.
    clock: Arc<dyn Clock>,
}

impl NotificationEngine {
    /// Creates a new notification engine.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        clock: Arc<dyn Clock>,
        config: &NotificationConfig,
    ) -> Self {
        Self {
            store,
            rules: NotificationRules::from_config(config),
            clock,
        }
    }

    /// The derivation rules in use.
    pub fn rules(&self) -> &NotificationRules {
        &self.rules
    }

    /// Record the notification an event produces, if any.
    ///
    /// Returns the stored notification, or `None` when the event is
    /// suppressed or the store write failed.
    pub async fn record(&self, event: &DomainEvent, for_role: Option<Role>) -> Option<Notification> {
        let payload = self.rules.derive(event, for_role)?;
        match self.store.create(&payload).await {
            Ok(stored) => {
                debug!(
                    rma = %stored.rma,
                    kind = %stored.kind,
                    role = %stored.for_role,
                    "Notification recorded"
                );
                Some(stored)
            }
            Err(e) => {
                warn!(
                    rma = %event.payload.rma(),
                    ticket_id = %event.payload.ticket_id(),
                    error = %e,
                    "Failed to record notification"
                );
                None
            }
        }
    }

    /// A ticket was created. Fires exactly once per creation.
    pub async fn notify_created(&self, ticket: &Ticket, for_role: Option<Role>) -> Option<Notification> {
        let event = DomainEvent::new(
            self.clock.now(),
            TicketEvent::Created {
                ticket_id: ticket.id.clone(),
                rma: ticket.rma.clone(),
                record_type: ticket.record_type.as_str().to_string(),
                status: ticket.status.clone(),
                technical_status: ticket.technical_status.clone(),
            },
        );
        self.record(&event, for_role).await
    }

    /// A ticket's technical status moved from `old` to `new`.
    pub async fn notify_technical_status_change(
        &self,
        ticket: &Ticket,
        old: Option<&str>,
        new: Option<&str>,
        for_role: Option<Role>,
    ) -> Option<Notification> {
        let event = DomainEvent::new(
            self.clock.now(),
            TicketEvent::TechnicalStatusChanged {
                ticket_id: ticket.id.clone(),
                rma: ticket.rma.clone(),
                status: ticket.status.clone(),
                old_technical_status: old.map(str::to_string),
                new_technical_status: new.map(str::to_string),
            },
        );
        self.record(&event, for_role).await
    }

    /// A technical note was attached alongside a technical status change.
    pub async fn notify_note_added(
        &self,
        ticket: &Ticket,
        note: &str,
        for_role: Option<Role>,
    ) -> Option<Notification> {
        let event = DomainEvent::new(
            self.clock.now(),
            TicketEvent::TechnicalNoteAdded {
                ticket_id: ticket.id.clone(),
                rma: ticket.rma.clone(),
                status: ticket.status.clone(),
                technical_status: ticket.technical_status.clone(),
                note: note.to_string(),
            },
        );
        self.record(&event, for_role).await
    }

    /// Every notification, newest first.
    pub async fn all(&self) -> AppResult<Vec<Notification>> {
        self.feed(NotificationQuery::all()).await
    }

    /// Unread notifications of every role, newest first.
    pub async fn unread(&self) -> AppResult<Vec<Notification>> {
        self.feed(NotificationQuery::unread()).await
    }

    /// Unread notifications addressed to a role, newest first.
    pub async fn unread_for(&self, role: Role) -> AppResult<Vec<Notification>> {
        self.feed(NotificationQuery::unread_for(role)).await
    }

    async fn feed(&self, query: NotificationQuery) -> AppResult<Vec<Notification>> {
        let mut notifications = self.store.list(query).await?;
        // Ids carry no order across clients; only the timestamp does.
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    /// Mark one notification as read.
    pub async fn mark_read(&self, id: &NotificationId) -> AppResult<Notification> {
        self.store.mark_read(id).await
    }

    /// Mark every unread notification (of one role, or all roles) as read.
    ///
    /// Returns how many were marked. If any write fails the error lists the
    /// failed ids in its field map; the rest stay marked and calling again
    /// retries only what is still unread.
    pub async fn mark_all_read(&self, role: Option<Role>) -> AppResult<usize> {
        let query = match role {
            Some(role) => NotificationQuery::unread_for(role),
            None => NotificationQuery::unread(),
        };
        let unread = self.store.list(query).await?;
        let total = unread.len();

        let results = join_all(unread.iter().map(|n| self.store.mark_read(&n.id))).await;

        let mut failed = FieldErrors::new();
        for (notification, result) in unread.iter().zip(results) {
            if let Err(e) = result {
                failed.insert(notification.id.to_string(), e.message);
            }
        }

        if failed.is_empty() {
            info!(count = total, role = ?role, "Marked notifications as read");
            return Ok(total);
        }

        warn!(failed = failed.len(), total, "Some notifications could not be marked as read");
        Err(AppError {
            fields: failed.clone(),
            ..AppError::new(
                ErrorKind::Store,
                format!(
                    "Failed to mark {} of {total} notifications as read",
                    failed.len()
                ),
            )
        })
    }

    /// Delete a notification (administrative).
    pub async fn delete(&self, id: &NotificationId) -> AppResult<()> {
        self.store.delete(id).await?;
        info!(notification_id = %id, "Notification deleted");
        Ok(())
    }
}
