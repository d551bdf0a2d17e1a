//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use rma_core::config::AppConfig;
use rma_core::traits::{Clock, FixedClock};
use rma_entity::ticket::Ticket;
use rma_service::rma_code::RmaCodeGenerator;
use rma_service::ticket::SubmissionForm;
use rma_service::{
    ActorContext, DashboardService, EligibilityEvaluator, KanbanController, LogMailer,
    NotificationEngine, SimulatedUploader, TicketService,
};
use rma_store::{MemoryNotificationStore, MemoryTicketStore};

/// "Today" in every integration test.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

/// Test application context wired against in-memory stores.
pub struct TestApp {
    pub tickets: Arc<MemoryTicketStore>,
    pub notifications: Arc<MemoryNotificationStore>,
    pub clock: Arc<FixedClock>,
    pub engine: NotificationEngine,
    pub service: TicketService,
    pub kanban: KanbanController,
    pub dashboard: DashboardService,
}

impl TestApp {
    /// Create a new test application.
    pub fn new() -> Self {
        Self::with_codes(RmaCodeGenerator::default())
    }

    /// Create a test application with a specific RMA generator.
    pub fn with_codes(codes: RmaCodeGenerator) -> Self {
        let config = AppConfig::default();
        let tickets = Arc::new(MemoryTicketStore::new());
        let notifications = Arc::new(MemoryNotificationStore::new());
        let clock = Arc::new(FixedClock::on(today()));
        let dyn_clock: Arc<dyn Clock> = clock.clone();

        let engine = NotificationEngine::new(
            notifications.clone(),
            dyn_clock.clone(),
            &config.notifications,
        );
        let service = TicketService::new(
            tickets.clone(),
            engine.clone(),
            EligibilityEvaluator::new(config.eligibility, dyn_clock.clone()),
            codes,
            Arc::new(SimulatedUploader::default()),
            Arc::new(LogMailer),
            dyn_clock.clone(),
            config.submission.clone(),
        );
        let kanban = KanbanController::new(tickets.clone(), engine.clone(), dyn_clock);
        let dashboard = DashboardService::new(tickets.clone());

        Self {
            tickets,
            notifications,
            clock,
            engine,
            service,
            kanban,
            dashboard,
        }
    }

    /// The pinned current instant.
    pub fn clock_now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Submit a valid repair request purchased `days_ago` days before today.
    pub async fn submit_repair(&self, days_ago: i64) -> Ticket {
        let form = repair_form(days_ago);
        self.service
            .submit(&form, None, false, &ActorContext::customer())
            .await
            .expect("submission should succeed")
            .ticket
    }
}

/// A complete repair form.
pub fn repair_form(days_ago: i64) -> SubmissionForm {
    let purchased = today() - chrono::Duration::days(days_ago);
    SubmissionForm {
        name: "Maria".to_string(),
        surname: "Papadopoulou".to_string(),
        email: "maria@example.gr".to_string(),
        phone_number: "+30 6900000000".to_string(),
        purchase_date: purchased.format("%Y-%m-%d").to_string(),
        product_code: "LAP-123".to_string(),
        category: "Laptop".to_string(),
        store: "Athens".to_string(),
        request_type: "repair".to_string(),
        issue_description: "Screen flickers".to_string(),
        ..SubmissionForm::default()
    }
}

/// A complete return form.
pub fn return_form(days_ago: i64) -> SubmissionForm {
    SubmissionForm {
        request_type: "return".to_string(),
        product_code: "TV-55".to_string(),
        category: "TV".to_string(),
        ..repair_form(days_ago)
    }
}
