//! The actor performing a request.

use serde::{Deserialize, Serialize};

use rma_entity::notification::Role;

/// Who is acting. Carried into service calls for logging and so that the
/// notification engine knows which role caused an event.
///
/// Authorization is not enforced by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    /// The actor's role.
    pub role: Role,
    /// Display name, when known.
    pub name: Option<String>,
}

impl ActorContext {
    /// Creates a context for a role.
    pub fn new(role: Role) -> Self {
        Self { role, name: None }
    }

    /// Attach a display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Customer context.
    pub fn customer() -> Self {
        Self::new(Role::Customer)
    }

    /// Employee context.
    pub fn employee() -> Self {
        Self::new(Role::Employee)
    }

    /// Technician context.
    pub fn technician() -> Self {
        Self::new(Role::Technician)
    }
}
