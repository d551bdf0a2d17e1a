//! Ticket lifecycle operations: submission, tracking, technician and
//! employee updates.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use rma_core::config::SubmissionConfig;
use rma_core::error::{AppError, ErrorKind, FieldErrors};
use rma_core::result::AppResult;
use rma_core::traits::Clock;
use rma_core::types::TicketId;
use rma_entity::ticket::{
    Customer, NewTicket, Priority, Product, RecordType, TechnicalStatus, Ticket, TicketPatch,
    TicketStatus,
};
use rma_store::TicketStore;

use super::update::{EmployeeEdit, TechnicianUpdate};
use super::validation::SubmissionForm;
use crate::context::ActorContext;
use crate::eligibility::{EligibilityEvaluator, EligibilityReason, EligibilityVerdict};
use crate::kanban::matches_search;
use crate::mail::Mailer;
use crate::notification::NotificationEngine;
use crate::rma_code::RmaCodeGenerator;
use crate::status::{StatusView, normalize};
use crate::upload::{Attachment, UploadedFile, Uploader};

/// Result of a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    /// The stored ticket.
    pub ticket: Ticket,
    /// Eligibility verdict at submission.
    pub verdict: EligibilityVerdict,
    /// Whether the request was accepted for manual review only.
    pub needs_review: bool,
    /// Path of the public tracking page.
    pub tracking_path: String,
    /// The uploaded attachment, if any.
    pub upload: Option<UploadedFile>,
}

/// A ticket with its derived status.
#[derive(Debug, Clone, Serialize)]
pub struct TrackedTicket {
    /// The ticket.
    pub ticket: Ticket,
    /// Derived stage, theme and badges.
    pub view: StatusView,
}

impl TrackedTicket {
    /// Derive the view for a ticket.
    pub fn new(ticket: Ticket) -> Self {
        let view = StatusView::of(&ticket);
        Self { ticket, view }
    }
}

/// Order a customer's tickets: open ones first (pending, then in repair),
/// then by most recent update.
pub fn sort_for_customer(tickets: &mut [TrackedTicket]) {
    tickets.sort_by(|a, b| {
        a.view
            .theme
            .open_rank()
            .cmp(&b.view.theme.open_rank())
            .then_with(|| {
                b.ticket
                    .updated_timestamp()
                    .cmp(&a.ticket.updated_timestamp())
            })
    });
}

/// Ticket lifecycle service.
#[derive(Debug, Clone)]
pub struct TicketService {
    /// Ticket store.
    tickets: Arc<dyn TicketStore>,
    /// Notification engine.
    notifications: NotificationEngine,
    /// Warranty and return window rules.
    eligibility: EligibilityEvaluator,
    /// RMA code generator.
    codes: RmaCodeGenerator,
    /// Attachment uploader.
    uploader: Arc<dyn Uploader>,
    /// Confirmation mailer.
    mailer: Arc<dyn Mailer>,
    /// Timestamp source.
    clock: Arc<dyn Clock>,
    /// Submission settings.
    config: SubmissionConfig,
}

impl TicketService {
    /// Creates a new ticket service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        notifications: NotificationEngine,
        eligibility: EligibilityEvaluator,
        codes: RmaCodeGenerator,
        uploader: Arc<dyn Uploader>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        config: SubmissionConfig,
    ) -> Self {
        Self {
            tickets,
            notifications,
            eligibility,
            codes,
            uploader,
            mailer,
            clock,
            config,
        }
    }

    /// Submit a new request.
    ///
    /// Validation failures and a future purchase date block submission. An
    /// out-of-warranty repair or a late return still goes through, flagged
    /// for review. A failed upload is returned as an `Upload` error unless
    /// `continue_without_file` is set, in which case the attachment is
    /// skipped.
    pub async fn submit(
        &self,
        form: &SubmissionForm,
        attachment: Option<&Attachment>,
        continue_without_file: bool,
        actor: &ActorContext,
    ) -> AppResult<SubmissionOutcome> {
        let record_type = form.validate()?;

        let upload = match attachment {
            Some(file) if !continue_without_file => Some(self.uploader.upload(file).await?),
            _ => None,
        };

        let verdict = self
            .eligibility
            .for_record_type(record_type, &form.purchase_date);
        match verdict.reason {
            EligibilityReason::FutureDate => {
                return Err(AppError::eligibility_rejection(verdict.message));
            }
            EligibilityReason::MissingDate | EligibilityReason::InvalidDate => {
                let mut fields = FieldErrors::new();
                fields.insert("purchase_date".to_string(), verdict.message.clone());
                return Err(AppError::validation_fields(verdict.message, fields));
            }
            _ => {}
        }

        let ticket = self.create_with_fresh_code(form, record_type, &verdict, upload.as_ref()).await?;
        info!(
            rma = %ticket.rma,
            ticket_id = %ticket.id,
            record_type = %record_type,
            eligibility = verdict.reason.as_str(),
            role = %actor.role,
            "Ticket submitted"
        );

        self.notifications.notify_created(&ticket, None).await;
        self.send_confirmation(&ticket, &verdict).await;

        Ok(SubmissionOutcome {
            tracking_path: format!(
                "{}/{}",
                self.config.tracking_path.trim_end_matches('/'),
                ticket.rma
            ),
            needs_review: verdict.needs_review(),
            ticket,
            verdict,
            upload,
        })
    }

    async fn create_with_fresh_code(
        &self,
        form: &SubmissionForm,
        record_type: RecordType,
        verdict: &EligibilityVerdict,
        upload: Option<&UploadedFile>,
    ) -> AppResult<Ticket> {
        let attempts = self.config.rma_max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let now = self.clock.now();
            let new_ticket = NewTicket {
                rma: self.codes.generate(now),
                customer: Customer {
                    name: form.full_name(),
                },
                email: form.email.trim().to_string(),
                phone: form.phone_number.trim().to_string(),
                purchase_date: form.purchase_date.trim().to_string(),
                address: form.address.clone(),
                product: Product {
                    name: form.product_code.trim().to_string(),
                    category: Some(form.category.trim().to_string()),
                },
                record_type,
                status: TicketStatus::INITIAL_TOKEN.to_string(),
                issue: form.issue_description.trim().to_string(),
                warranty: verdict.ok,
                priority: Priority::Low,
                store: form.store.trim().to_string(),
                photo_url: upload.map(|u| u.url.clone()),
                created_at: now,
                last_updated: now,
            };

            match self.tickets.create(&new_ticket).await {
                Ok(ticket) => return Ok(ticket),
                Err(e) if e.kind == ErrorKind::Conflict && attempt < attempts => {
                    warn!(rma = %new_ticket.rma, attempt, "RMA code already taken, regenerating");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_confirmation(&self, ticket: &Ticket, verdict: &EligibilityVerdict) {
        let Some(email) = ticket.email.as_deref().filter(|e| !e.is_empty()) else {
            return;
        };
        let subject = format!("Your RMA request {}", ticket.rma);
        let body = format!(
            "Dear {},\n\nYour {} request has been received.\nRMA code: {}\n{}\n",
            ticket.customer.name, ticket.record_type, ticket.rma, verdict.message
        );
        if let Err(e) = self.mailer.send(email, &subject, &body).await {
            warn!(rma = %ticket.rma, error = %e, "Failed to send confirmation email");
        }
    }

    /// Every ticket.
    pub async fn list(&self) -> AppResult<Vec<Ticket>> {
        self.tickets.list().await
    }

    /// Fetch a ticket by id.
    pub async fn get(&self, id: &TicketId) -> AppResult<Ticket> {
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ticket {id} not found")))
    }

    /// Look a request up by RMA code (trimmed, case-insensitive).
    pub async fn track(&self, rma: &str) -> AppResult<TrackedTicket> {
        let code = rma.trim();
        if code.is_empty() {
            return Err(AppError::validation("Please enter an RMA code."));
        }
        let ticket = self
            .tickets
            .find_by_rma(code)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No request found for RMA {code}")))?;
        Ok(TrackedTicket::new(ticket))
    }

    /// A customer's tickets, matched by email, open ones first.
    pub async fn my_tickets(&self, email: &str) -> AppResult<Vec<TrackedTicket>> {
        let email = email.trim();
        let mut mine: Vec<TrackedTicket> = self
            .tickets
            .list()
            .await?
            .into_iter()
            .filter(|t| {
                t.email
                    .as_deref()
                    .is_some_and(|e| e.trim().eq_ignore_ascii_case(email))
            })
            .map(TrackedTicket::new)
            .collect();
        sort_for_customer(&mut mine);
        Ok(mine)
    }

    /// Apply a partial update, stamping `last_updated`.
    pub async fn update(&self, id: &TicketId, patch: TicketPatch) -> AppResult<Ticket> {
        let patch = patch.stamped(self.clock.now());
        self.tickets.update(id, &patch).await
    }

    /// Apply a technician's update and notify about it.
    ///
    /// A technical status change notifies (except the first `Pending`). A
    /// note notifies only when it arrives together with a status change.
    pub async fn technician_update(
        &self,
        id: &TicketId,
        update: &TechnicianUpdate,
        actor: &ActorContext,
    ) -> AppResult<Ticket> {
        let patch = update.to_patch();
        if patch.is_empty() {
            return Err(AppError::validation("Nothing to update."));
        }

        let before = self.get(id).await?;
        let updated = self.update(id, patch).await?;

        let old = before.technical_status.as_deref();
        let new = updated.technical_status.as_deref();
        let status_changed = normalize(old) != normalize(new);
        info!(
            rma = %updated.rma,
            from = old.unwrap_or("None"),
            to = new.unwrap_or("None"),
            role = %actor.role,
            "Technician update"
        );

        if status_changed {
            self.notifications
                .notify_technical_status_change(&updated, old, new, None)
                .await;
            if let Some(note) = update.technical_notes.as_deref().filter(|n| !n.trim().is_empty()) {
                self.notifications.notify_note_added(&updated, note, None).await;
            }
        } else if update.technical_notes.is_some() {
            debug!(rma = %updated.rma, "Note-only update, no notification");
        }

        Ok(updated)
    }

    /// Tickets a technician has touched, optionally filtered by technical
    /// status and a free-text search.
    pub async fn technician_queue(
        &self,
        filter: Option<TechnicalStatus>,
        search: &str,
    ) -> AppResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .list()
            .await?
            .into_iter()
            .filter(Ticket::has_technical_status)
            .filter(|t| filter.is_none_or(|f| t.technical() == Some(f)))
            .filter(|t| matches_search(t, search))
            .collect())
    }

    /// Apply an employee's assignment or warranty edit.
    pub async fn employee_edit(
        &self,
        id: &TicketId,
        edit: &EmployeeEdit,
        actor: &ActorContext,
    ) -> AppResult<Ticket> {
        let patch = edit.to_patch();
        if patch.is_empty() {
            return Err(AppError::validation("Nothing to update."));
        }
        let updated = self.update(id, patch).await?;
        info!(
            rma = %updated.rma,
            assigned_to = updated.assignee().unwrap_or("Unassigned"),
            warranty = updated.warranty,
            role = %actor.role,
            "Ticket edited"
        );
        Ok(updated)
    }

    /// Delete a ticket (administrative).
    pub async fn delete(&self, id: &TicketId, actor: &ActorContext) -> AppResult<()> {
        self.tickets.delete(id).await?;
        info!(ticket_id = %id, role = %actor.role, "Ticket deleted");
        Ok(())
    }
}
