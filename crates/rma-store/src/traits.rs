//! Store traits for tickets and notifications.

use async_trait::async_trait;

use rma_core::result::AppResult;
use rma_core::types::{NotificationId, TicketId};
use rma_entity::notification::{NewNotification, Notification, Role};
use rma_entity::ticket::{NewTicket, Ticket, TicketPatch};

/// CRUD access to the ticket collection.
#[async_trait]
pub trait TicketStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch every ticket.
    async fn list(&self) -> AppResult<Vec<Ticket>>;

    /// Fetch a ticket by id.
    async fn find_by_id(&self, id: &TicketId) -> AppResult<Option<Ticket>>;

    /// Fetch the ticket carrying an RMA code (case-insensitive).
    async fn find_by_rma(&self, rma: &str) -> AppResult<Option<Ticket>>;

    /// Create a ticket. Fails with `Conflict` if the RMA code is taken.
    async fn create(&self, ticket: &NewTicket) -> AppResult<Ticket>;

    /// Apply a partial update and return the stored result.
    async fn update(&self, id: &TicketId, patch: &TicketPatch) -> AppResult<Ticket>;

    /// Delete a ticket (administrative).
    async fn delete(&self, id: &TicketId) -> AppResult<()>;
}

/// Filter for notification listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationQuery {
    /// Only notifications addressed to this role.
    pub for_role: Option<Role>,
    /// Only notifications with this read flag.
    pub read: Option<bool>,
}

impl NotificationQuery {
    /// Everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Unread notifications of every role.
    pub fn unread() -> Self {
        Self {
            for_role: None,
            read: Some(false),
        }
    }

    /// Unread notifications of one role.
    pub fn unread_for(role: Role) -> Self {
        Self {
            for_role: Some(role),
            read: Some(false),
        }
    }

    /// Query-string pairs for the REST store: the filters, then a
    /// newest-first order on `created_at`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(role) = self.for_role {
            pairs.push(("for_role", role.as_str().to_string()));
        }
        if let Some(read) = self.read {
            pairs.push(("read", read.to_string()));
        }
        pairs.push(("_sort", "created_at".to_string()));
        pairs.push(("_order", "desc".to_string()));
        pairs
    }

    /// Whether a notification passes the filter.
    pub fn matches(&self, notification: &Notification) -> bool {
        self.for_role.is_none_or(|r| notification.for_role == r)
            && self.read.is_none_or(|r| notification.read == r)
    }
}

/// Access to the notification collection.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// List notifications matching the query, newest first.
    async fn list(&self, query: NotificationQuery) -> AppResult<Vec<Notification>>;

    /// Record a notification.
    async fn create(&self, notification: &NewNotification) -> AppResult<Notification>;

    /// Set the read flag of one notification.
    async fn mark_read(&self, id: &NotificationId) -> AppResult<Notification>;

    /// Delete a notification (administrative).
    async fn delete(&self, id: &NotificationId) -> AppResult<()>;
}
