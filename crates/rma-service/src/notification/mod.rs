//! Notification engine and derivation rules.

pub mod rules;
pub mod service;

pub use rules::NotificationRules;
pub use service::NotificationEngine;
