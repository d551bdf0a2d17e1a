//! Portal role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Actors of the portal. Notification feeds are addressed per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Files requests and tracks them.
    Customer,
    /// Triages tickets on the kanban board.
    Employee,
    /// Updates technical status and notes.
    Technician,
    /// Views aggregate analytics.
    Manager,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Employee => "employee",
            Self::Technician => "technician",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = rma_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "employee" => Ok(Self::Employee),
            "technician" => Ok(Self::Technician),
            "manager" => Ok(Self::Manager),
            _ => Err(rma_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: customer, employee, technician, manager"
            ))),
        }
    }
}
