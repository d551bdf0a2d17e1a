//! Domain events emitted by ticket lifecycle transitions.
//!
//! Events are produced by the ticket service after a store write succeeds
//! and are consumed by the notification engine, which turns them into
//! persisted, role-addressed notifications.

pub mod ticket;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use ticket::TicketEvent;

/// Wrapper for a lifecycle event with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// When the triggering write was made.
    pub timestamp: DateTime<Utc>,
    /// The actor role that caused the event (`customer`, `employee`, ...).
    pub actor: Option<String>,
    /// The event payload.
    pub payload: TicketEvent,
}

impl DomainEvent {
    /// Wrap a payload stamped at `timestamp`.
    pub fn new(timestamp: DateTime<Utc>, payload: TicketEvent) -> Self {
        Self {
            timestamp,
            actor: None,
            payload,
        }
    }

    /// Attach the acting role.
    pub fn by(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}
