//! Dashboard loading.

use std::sync::Arc;

use tracing::debug;

use rma_core::result::AppResult;
use rma_store::TicketStore;

use super::aggregate::{DashboardData, aggregate};

/// Loads the manager dashboard.
#[derive(Debug, Clone)]
pub struct DashboardService {
    /// Ticket store.
    tickets: Arc<dyn TicketStore>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(tickets: Arc<dyn TicketStore>) -> Self {
        Self { tickets }
    }

    /// Recompute the dashboard from the full collection.
    pub async fn load(&self) -> AppResult<DashboardData> {
        let tickets = self.tickets.list().await?;
        let data = aggregate(&tickets);
        debug!(
            total = data.stats.total,
            pending = data.stats.pending,
            completed = data.stats.completed,
            "Dashboard recomputed"
        );
        Ok(data)
    }
}
