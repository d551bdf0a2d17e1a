//! Ticket domain entities.

pub mod model;
pub mod priority;
pub mod status;

pub use model::{Customer, NewTicket, Product, Ticket, TicketPatch};
pub use priority::Priority;
pub use status::{RecordType, RepairStatus, ReturnStatus, TechnicalStatus, TicketStatus};
