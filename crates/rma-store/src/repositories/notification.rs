//! Notification repository over the REST store.

use async_trait::async_trait;

use rma_core::result::AppResult;
use rma_core::types::NotificationId;
use rma_entity::notification::{NewNotification, Notification};

use crate::client::StoreClient;
use crate::traits::{NotificationQuery, NotificationStore};

const COLLECTION: &str = "notifications";

/// Repository for notification operations.
#[derive(Debug, Clone)]
pub struct HttpNotificationRepository {
    client: StoreClient,
}

impl HttpNotificationRepository {
    /// Create a new notification repository.
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationStore for HttpNotificationRepository {
    async fn list(&self, query: NotificationQuery) -> AppResult<Vec<Notification>> {
        let url = self.client.url(COLLECTION, &query.query_pairs())?;
        let mut notifications: Vec<Notification> = self.client.get_json(url).await?;

        // Server-side sorting is a hint; the order contract is by timestamp.
        notifications.retain(|n| query.matches(n));
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn create(&self, notification: &NewNotification) -> AppResult<Notification> {
        let url = self.client.url(COLLECTION, &[])?;
        self.client.post_json(url, notification).await
    }

    async fn mark_read(&self, id: &NotificationId) -> AppResult<Notification> {
        let url = self.client.url(&format!("{COLLECTION}/{id}"), &[])?;
        self.client
            .patch_json(url, &serde_json::json!({ "read": true }))
            .await
    }

    async fn delete(&self, id: &NotificationId) -> AppResult<()> {
        let url = self.client.url(&format!("{COLLECTION}/{id}"), &[])?;
        self.client.delete(url).await
    }
}
