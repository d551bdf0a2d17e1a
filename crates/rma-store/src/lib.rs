//! # rma-store
//!
//! Access to the persisted ticket and notification collections. The
//! store is an opaque REST service and the single serialization point:
//! writes are last-write-wins and no concurrency token is sent.
//!
//! Two implementations of the store traits are provided: the HTTP
//! repositories used in production, and an in-memory store used by tests
//! and offline tooling.

pub mod client;
pub mod memory;
pub mod repositories;
pub mod traits;

pub use client::StoreClient;
pub use memory::{MemoryNotificationStore, MemoryTicketStore};
pub use repositories::{HttpNotificationRepository, HttpTicketRepository};
pub use traits::{NotificationQuery, NotificationStore, TicketStore};
