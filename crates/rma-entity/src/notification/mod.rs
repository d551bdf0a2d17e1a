//! Notification domain entities.

pub mod kind;
pub mod model;
pub mod role;

pub use kind::NotificationKind;
pub use model::{NewNotification, Notification};
pub use role::Role;
