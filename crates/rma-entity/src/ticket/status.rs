//! Ticket record type, customer status and technical status enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use rma_core::AppError;

/// Compare a raw stored token against a canonical one, ignoring case and
/// surrounding whitespace.
fn token_eq(raw: &str, canonical: &str) -> bool {
    raw.trim().eq_ignore_ascii_case(canonical)
}

/// Kind of request. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    /// The customer wants the product repaired.
    #[default]
    Repair,
    /// The customer wants to return the product.
    Return,
}

impl RecordType {
    /// Return the record type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repair => "repair",
            Self::Return => "return",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "repair" => Ok(Self::Repair),
            "return" => Ok(Self::Return),
            _ => Err(AppError::validation(format!(
                "Invalid request type: '{s}'. Expected one of: repair, return"
            ))),
        }
    }
}

/// Customer-facing lifecycle of a repair ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairStatus {
    /// Submitted, awaiting triage.
    Pending,
    /// Accepted for repair.
    Approved,
    /// Being repaired.
    InRepair,
    /// Repair finished.
    Completed,
    /// Request refused.
    Rejected,
}

impl RepairStatus {
    /// Kanban column order.
    pub const ALL: [RepairStatus; 5] = [
        Self::Pending,
        Self::Approved,
        Self::InRepair,
        Self::Completed,
        Self::Rejected,
    ];

    /// Return the stored token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::InRepair => "in-repair",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// Column heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::InRepair => "In Repair",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
        }
    }

    /// Parse a raw stored status, tolerant of case, whitespace and `in repair`.
    pub fn parse(raw: &str) -> Option<Self> {
        if token_eq(raw, "in repair") {
            return Some(Self::InRepair);
        }
        Self::ALL.into_iter().find(|s| token_eq(raw, s.as_str()))
    }
}

/// Customer-facing lifecycle of a return ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnStatus {
    /// Submitted. Stored either as `requested` or `pending`.
    Requested,
    /// Product received back.
    Received,
    /// Return accepted.
    Approved,
    /// Money returned.
    Refunded,
    /// Return refused.
    Rejected,
}

impl ReturnStatus {
    /// Kanban column order.
    pub const ALL: [ReturnStatus; 5] = [
        Self::Requested,
        Self::Received,
        Self::Approved,
        Self::Refunded,
        Self::Rejected,
    ];

    /// Return the stored token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Received => "received",
            Self::Approved => "approved",
            Self::Refunded => "refunded",
            Self::Rejected => "rejected",
        }
    }

    /// Column heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Requested => "Requested",
            Self::Received => "Received",
            Self::Approved => "Approved",
            Self::Refunded => "Refunded",
            Self::Rejected => "Rejected",
        }
    }

    /// Parse a raw stored status. `pending` is an alias of `requested`.
    pub fn parse(raw: &str) -> Option<Self> {
        if token_eq(raw, "pending") {
            return Some(Self::Requested);
        }
        Self::ALL.into_iter().find(|s| token_eq(raw, s.as_str()))
    }
}

/// A customer status interpreted against its record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    /// Status of a repair ticket.
    Repair(RepairStatus),
    /// Status of a return ticket.
    Return(ReturnStatus),
}

impl TicketStatus {
    /// Parse a raw status for the given record type.
    pub fn parse(record_type: RecordType, raw: &str) -> Option<Self> {
        match record_type {
            RecordType::Repair => RepairStatus::parse(raw).map(Self::Repair),
            RecordType::Return => ReturnStatus::parse(raw).map(Self::Return),
        }
    }

    /// Token stored on every new ticket, repair or return. Return boards
    /// file it under `requested`.
    pub const INITIAL_TOKEN: &'static str = "pending";

    /// The record type this status belongs to.
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::Repair(_) => RecordType::Repair,
            Self::Return(_) => RecordType::Return,
        }
    }

    /// Return the stored token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repair(s) => s.as_str(),
            Self::Return(s) => s.as_str(),
        }
    }

    /// Column heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Repair(s) => s.label(),
            Self::Return(s) => s.label(),
        }
    }

    /// All statuses of a record type, in column order.
    pub fn columns(record_type: RecordType) -> Vec<Self> {
        match record_type {
            RecordType::Repair => RepairStatus::ALL.into_iter().map(Self::Repair).collect(),
            RecordType::Return => ReturnStatus::ALL.into_iter().map(Self::Return).collect(),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Internal workflow stage tracked by technicians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechnicalStatus {
    /// Waiting for a technician.
    Pending,
    /// Technician approved the repair.
    Approved,
    /// Repair in progress.
    #[serde(rename = "In Repair")]
    InRepair,
    /// Repair done.
    Completed,
    /// Technician rejected the repair.
    Rejected,
}

impl TechnicalStatus {
    /// Options offered to technicians, in order.
    pub const ALL: [TechnicalStatus; 5] = [
        Self::Pending,
        Self::Approved,
        Self::InRepair,
        Self::Completed,
        Self::Rejected,
    ];

    /// Return the stored token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::InRepair => "In Repair",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
        }
    }

    /// Parse a raw stored technical status.
    pub fn parse(raw: &str) -> Option<Self> {
        if token_eq(raw, "in-repair") {
            return Some(Self::InRepair);
        }
        Self::ALL.into_iter().find(|s| token_eq(raw, s.as_str()))
    }

    /// Whether the repair is still underway. `Completed` and `Rejected`
    /// close the technical workflow.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved | Self::InRepair)
    }
}

impl fmt::Display for TechnicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TechnicalStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid technical status: '{s}'. Expected one of: Pending, Approved, In Repair, Completed, Rejected"
            ))
        })
    }
}
