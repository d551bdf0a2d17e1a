//! Ticket repository over the REST store.

use async_trait::async_trait;
use tracing::debug;

use rma_core::result::AppResult;
use rma_core::types::TicketId;
use rma_entity::ticket::{NewTicket, Ticket, TicketPatch};

use crate::client::StoreClient;
use crate::traits::TicketStore;

const COLLECTION: &str = "tickets";

/// Repository for ticket CRUD operations.
#[derive(Debug, Clone)]
pub struct HttpTicketRepository {
    client: StoreClient,
}

impl HttpTicketRepository {
    /// Create a new ticket repository.
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    fn item_path(id: &TicketId) -> String {
        format!("{COLLECTION}/{id}")
    }
}

#[async_trait]
impl TicketStore for HttpTicketRepository {
    async fn list(&self) -> AppResult<Vec<Ticket>> {
        let url = self.client.url(COLLECTION, &[])?;
        self.client.get_json(url).await
    }

    async fn find_by_id(&self, id: &TicketId) -> AppResult<Option<Ticket>> {
        let url = self.client.url(&Self::item_path(id), &[])?;
        self.client.get_optional(url).await
    }

    async fn find_by_rma(&self, rma: &str) -> AppResult<Option<Ticket>> {
        let code = rma.trim().to_uppercase();
        if code.is_empty() {
            return Ok(None);
        }

        let url = self.client.url(COLLECTION, &[("rma", code.clone())])?;
        let matches: Vec<Ticket> = self.client.get_json(url).await?;
        debug!(rma = %code, count = matches.len(), "RMA lookup");

        // The store matches exactly; re-check in case it matched loosely.
        Ok(matches
            .into_iter()
            .find(|t| t.rma.trim().eq_ignore_ascii_case(&code)))
    }

    async fn create(&self, ticket: &NewTicket) -> AppResult<Ticket> {
        let url = self.client.url(COLLECTION, &[])?;
        self.client.post_json(url, ticket).await
    }

    async fn update(&self, id: &TicketId, patch: &TicketPatch) -> AppResult<Ticket> {
        let url = self.client.url(&Self::item_path(id), &[])?;
        self.client.patch_json(url, patch).await
    }

    async fn delete(&self, id: &TicketId) -> AppResult<()> {
        let url = self.client.url(&Self::item_path(id), &[])?;
        self.client.delete(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rma_core::config::StoreConfig;
    use rma_core::error::ErrorKind;

    fn repo_for(server: &mockito::ServerGuard) -> HttpTicketRepository {
        let config = StoreConfig {
            base_url: server.url(),
            ..StoreConfig::default()
        };
        HttpTicketRepository::new(StoreClient::connect(&config).expect("client"))
    }

    #[tokio::test]
    async fn test_find_by_rma_uppercases_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tickets")
            .match_query(Matcher::UrlEncoded("rma".into(), "RMA-2025-AB12CD34".into()))
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1, "rma": "RMA-2025-AB12CD34", "status": "pending"}]"#)
            .create_async()
            .await;

        let ticket = repo_for(&server)
            .find_by_rma("  rma-2025-ab12cd34 ")
            .await
            .expect("lookup")
            .expect("ticket present");

        assert_eq!(ticket.rma, "RMA-2025-AB12CD34");
        assert_eq!(ticket.id.as_str(), "1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_patch_sends_partial_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/tickets/9")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "status": "in-repair",
                "technical_status": "Pending"
            })))
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id": 9, "rma": "RMA-2025-00000009", "status": "in-repair", "technical_status": "Pending"}"#,
            )
            .create_async()
            .await;

        let patch = TicketPatch::status("in-repair")
            .with_technical_status(Some("Pending".to_string()))
            .stamped(chrono::Utc::now());
        let updated = repo_for(&server)
            .update(&TicketId::from("9"), &patch)
            .await
            .expect("update");

        assert_eq!(updated.technical_status.as_deref(), Some("Pending"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_maps_to_store_error_with_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/tickets")
            .with_status(500)
            .with_body(r#"{"message": "disk full"}"#)
            .create_async()
            .await;

        let new_ticket = NewTicket {
            rma: "RMA-2025-DEADBEEF".to_string(),
            customer: Default::default(),
            email: "a@b.gr".to_string(),
            phone: "+30 210".to_string(),
            purchase_date: "2025-01-01".to_string(),
            address: None,
            product: Default::default(),
            record_type: Default::default(),
            status: "pending".to_string(),
            issue: "broken".to_string(),
            warranty: true,
            priority: Default::default(),
            store: "Athens".to_string(),
            photo_url: None,
            created_at: chrono::Utc::now(),
            last_updated: chrono::Utc::now(),
        };

        let err = repo_for(&server)
            .create(&new_ticket)
            .await
            .expect_err("should fail");
        assert_eq!(err.kind, ErrorKind::Store);
        assert_eq!(err.message, "disk full");
    }

    #[tokio::test]
    async fn test_missing_ticket_is_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/tickets/404")
            .with_status(404)
            .create_async()
            .await;

        let found = repo_for(&server)
            .find_by_id(&TicketId::from("404"))
            .await
            .expect("lookup");
        assert!(found.is_none());
    }
}
