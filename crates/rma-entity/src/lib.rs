//! # rma-entity
//!
//! Domain models for the RMA portal. Every struct in this crate is either a
//! record held by the REST store (`Ticket`, `Notification`), a write payload
//! for it (`NewTicket`, `TicketPatch`, `NewNotification`), or a value enum.
//!
//! Status fields are kept as the raw strings the store returns, because the
//! store does not normalize on write. Typed views are obtained through the
//! `parse` helpers on the status enums.

pub mod notification;
pub mod ticket;
pub mod timestamp;
