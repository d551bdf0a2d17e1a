//! # rma-service
//!
//! The ticket lifecycle and status-derivation engine of the RMA portal.
//!
//! Pure rules (eligibility windows, the status model, notification
//! suppression, kanban transition planning, dashboard folds) live in plain
//! functions so every actor derives byte-identical results. Services wrap
//! them with store access and follow constructor injection: all
//! dependencies are provided at construction time via `Arc` references.

pub mod context;
pub mod dashboard;
pub mod eligibility;
pub mod kanban;
pub mod mail;
pub mod notification;
pub mod rma_code;
pub mod status;
pub mod ticket;
pub mod upload;
pub mod view;

pub use context::ActorContext;
pub use dashboard::{DashboardData, DashboardService};
pub use eligibility::{EligibilityEvaluator, EligibilityReason, EligibilityVerdict, Severity};
pub use kanban::{Board, DragRequest, KanbanController, TransitionPlan};
pub use mail::{LogMailer, Mailer};
pub use notification::{NotificationEngine, NotificationRules};
pub use rma_code::{RandomSource, RmaCodeGenerator};
pub use status::{StatusView, Theme};
pub use ticket::{SubmissionForm, SubmissionOutcome, TicketService};
pub use upload::{Attachment, SimulatedUploader, UploadedFile, Uploader};
pub use view::{ViewGuard, ViewToken};
