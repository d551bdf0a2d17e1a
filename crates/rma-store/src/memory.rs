//! In-memory store implementations.
//!
//! Used by tests and offline tooling. They follow the REST store's
//! observable contract: ids are assigned on create, RMA codes are unique,
//! and every write can be made to fail to exercise rollback paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use rma_core::error::AppError;
use rma_core::result::AppResult;
use rma_core::types::{NotificationId, TicketId};
use rma_entity::notification::{NewNotification, Notification};
use rma_entity::ticket::{NewTicket, Ticket, TicketPatch};

use crate::traits::{NotificationQuery, NotificationStore, TicketStore};

/// Ticket collection held in memory.
#[derive(Debug, Default)]
pub struct MemoryTicketStore {
    tickets: RwLock<BTreeMap<u64, Ticket>>,
    next_id: AtomicU64,
    reject_writes: AtomicBool,
}

impl MemoryTicketStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding existing records (ids are kept as given).
    pub async fn seeded(tickets: Vec<Ticket>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.tickets.write().await;
            for ticket in tickets {
                let key = store.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                guard.insert(key, ticket);
            }
        }
        store
    }

    /// Make every subsequent write fail with a store error (or stop doing so).
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(AppError::store("Store rejected the write"));
        }
        Ok(())
    }

    fn key_of(map: &BTreeMap<u64, Ticket>, id: &TicketId) -> Option<u64> {
        map.iter().find(|(_, t)| &t.id == id).map(|(k, _)| *k)
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn list(&self) -> AppResult<Vec<Ticket>> {
        Ok(self.tickets.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &TicketId) -> AppResult<Option<Ticket>> {
        Ok(self
            .tickets
            .read()
            .await
            .values()
            .find(|t| &t.id == id)
            .cloned())
    }

    async fn find_by_rma(&self, rma: &str) -> AppResult<Option<Ticket>> {
        let code = rma.trim();
        if code.is_empty() {
            return Ok(None);
        }
        Ok(self
            .tickets
            .read()
            .await
            .values()
            .find(|t| t.rma.trim().eq_ignore_ascii_case(code))
            .cloned())
    }

    async fn create(&self, ticket: &NewTicket) -> AppResult<Ticket> {
        self.check_writable()?;
        let mut guard = self.tickets.write().await;

        if guard
            .values()
            .any(|t| t.rma.eq_ignore_ascii_case(&ticket.rma))
        {
            return Err(AppError::conflict(format!(
                "RMA code {} already exists",
                ticket.rma
            )));
        }

        let key = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = ticket.clone().into_ticket(TicketId::new(key.to_string()));
        guard.insert(key, created.clone());
        Ok(created)
    }

    async fn update(&self, id: &TicketId, patch: &TicketPatch) -> AppResult<Ticket> {
        self.check_writable()?;
        let mut guard = self.tickets.write().await;
        let key = Self::key_of(&guard, id)
            .ok_or_else(|| AppError::not_found(format!("Ticket {id} not found")))?;
        let ticket = guard
            .get_mut(&key)
            .ok_or_else(|| AppError::not_found(format!("Ticket {id} not found")))?;
        patch.apply_to(ticket);
        Ok(ticket.clone())
    }

    async fn delete(&self, id: &TicketId) -> AppResult<()> {
        self.check_writable()?;
        let mut guard = self.tickets.write().await;
        let key = Self::key_of(&guard, id)
            .ok_or_else(|| AppError::not_found(format!("Ticket {id} not found")))?;
        guard.remove(&key);
        Ok(())
    }
}

/// Notification collection held in memory.
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    notifications: RwLock<Vec<Notification>>,
    next_id: AtomicU64,
    reject_writes: AtomicBool,
    /// Fail `mark_read` for this id, to exercise partial bulk failures.
    poisoned: RwLock<Option<NotificationId>>,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a store error (or stop doing so).
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Make `mark_read` fail for one id.
    pub async fn poison(&self, id: Option<NotificationId>) {
        *self.poisoned.write().await = id;
    }

    /// Number of records held, read or not.
    pub async fn len(&self) -> usize {
        self.notifications.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.notifications.read().await.is_empty()
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(AppError::store("Store rejected the write"));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn list(&self, query: NotificationQuery) -> AppResult<Vec<Notification>> {
        let mut matching: Vec<Notification> = self
            .notifications
            .read()
            .await
            .iter()
            .filter(|n| query.matches(n))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn create(&self, notification: &NewNotification) -> AppResult<Notification> {
        self.check_writable()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = notification
            .clone()
            .into_notification(NotificationId::new(format!("notif-{id}")));
        self.notifications.write().await.push(created.clone());
        Ok(created)
    }

    async fn mark_read(&self, id: &NotificationId) -> AppResult<Notification> {
        self.check_writable()?;
        if self.poisoned.read().await.as_ref() == Some(id) {
            return Err(AppError::store(format!("Failed to update notification {id}")));
        }
        let mut guard = self.notifications.write().await;
        let notification = guard
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;
        notification.read = true;
        Ok(notification.clone())
    }

    async fn delete(&self, id: &NotificationId) -> AppResult<()> {
        self.check_writable()?;
        let mut guard = self.notifications.write().await;
        let before = guard.len();
        guard.retain(|n| &n.id != id);
        if guard.len() == before {
            return Err(AppError::not_found(format!("Notification {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rma_core::error::ErrorKind;
    use rma_entity::ticket::{Customer, Product, RecordType};

    fn new_ticket(rma: &str) -> NewTicket {
        let now = chrono::Utc::now();
        NewTicket {
            rma: rma.to_string(),
            customer: Customer {
                name: "Maria Papadopoulou".to_string(),
            },
            email: "maria@example.gr".to_string(),
            phone: "+30 6900000000".to_string(),
            purchase_date: "2025-01-10".to_string(),
            address: None,
            product: Product {
                name: "LAP-123".to_string(),
                category: Some("Laptop".to_string()),
            },
            record_type: RecordType::Repair,
            status: "pending".to_string(),
            issue: "Screen flickers".to_string(),
            warranty: true,
            priority: Default::default(),
            store: "Athens".to_string(),
            photo_url: None,
            created_at: now,
            last_updated: now,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_enforces_unique_rma() {
        let store = MemoryTicketStore::new();
        let created = store
            .create(&new_ticket("RMA-2025-AAAA0001"))
            .await
            .expect("create");
        assert_eq!(created.id.as_str(), "1");

        let err = store
            .create(&new_ticket("rma-2025-aaaa0001"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_rejected_write_leaves_record_untouched() {
        let store = MemoryTicketStore::new();
        let created = store
            .create(&new_ticket("RMA-2025-AAAA0002"))
            .await
            .expect("create");

        store.reject_writes(true);
        let err = store
            .update(&created.id, &TicketPatch::status("approved"))
            .await
            .expect_err("rejected");
        assert_eq!(err.kind, ErrorKind::Store);

        let stored = store.find_by_id(&created.id).await.expect("get").expect("present");
        assert_eq!(stored.status, "pending");
    }
}
