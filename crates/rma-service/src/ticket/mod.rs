//! Ticket submission, tracking and updates.

pub mod service;
pub mod update;
pub mod validation;

pub use service::{SubmissionOutcome, TicketService, TrackedTicket, sort_for_customer};
pub use update::{EmployeeEdit, TechnicianUpdate};
pub use validation::{CATEGORIES, STORES, SubmissionForm, check_email};
