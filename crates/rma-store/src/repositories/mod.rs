//! REST repository implementations of the store traits.

pub mod notification;
pub mod ticket;

pub use notification::HttpNotificationRepository;
pub use ticket::HttpTicketRepository;
