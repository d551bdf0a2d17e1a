//! Warranty and return-window eligibility.
//!
//! Both evaluators are pure functions of `(purchase_date, today)`. The only
//! persisted trace of a verdict is the ticket's `warranty` flag, which
//! freezes the repair verdict at submission time; anything else can be
//! re-derived later from the stored purchase date.

pub mod return_window;
pub mod warranty;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rma_core::config::EligibilityConfig;
use rma_core::traits::Clock;
use rma_entity::ticket::RecordType;

pub use return_window::evaluate_return;
pub use warranty::{evaluate_warranty, warranty_cutoff};

/// Why a verdict came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityReason {
    /// No purchase date was given.
    MissingDate,
    /// The purchase date could not be parsed.
    InvalidDate,
    /// The purchase date is after today.
    FutureDate,
    /// Within the repair warranty.
    InWarranty,
    /// Past the repair warranty.
    OutOfWarranty,
    /// Within the return window.
    WithinReturnWindow,
    /// Past the return window.
    ReturnWindowExceeded,
}

impl EligibilityReason {
    /// Return the reason as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingDate => "missing_date",
            Self::InvalidDate => "invalid_date",
            Self::FutureDate => "future_date",
            Self::InWarranty => "in_warranty",
            Self::OutOfWarranty => "out_of_warranty",
            Self::WithinReturnWindow => "within_return_window",
            Self::ReturnWindowExceeded => "return_window_exceeded",
        }
    }
}

/// How a verdict affects submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Eligible.
    Eligible,
    /// Not eligible, but the request proceeds and is flagged for manual review.
    Review,
    /// Submission is blocked.
    Blocked,
}

/// Outcome of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    /// Whether the product is eligible.
    pub ok: bool,
    /// Machine-readable reason.
    pub reason: EligibilityReason,
    /// Message shown to the customer.
    pub message: String,
}

impl EligibilityVerdict {
    pub(crate) fn new(ok: bool, reason: EligibilityReason, message: impl Into<String>) -> Self {
        Self {
            ok,
            reason,
            message: message.into(),
        }
    }

    /// How this verdict affects submission.
    pub fn severity(&self) -> Severity {
        match self.reason {
            EligibilityReason::InWarranty | EligibilityReason::WithinReturnWindow => {
                Severity::Eligible
            }
            EligibilityReason::OutOfWarranty | EligibilityReason::ReturnWindowExceeded => {
                Severity::Review
            }
            EligibilityReason::MissingDate
            | EligibilityReason::InvalidDate
            | EligibilityReason::FutureDate => Severity::Blocked,
        }
    }

    /// Whether the verdict blocks submission.
    pub fn is_blocking(&self) -> bool {
        self.severity() == Severity::Blocked
    }

    /// Whether the ticket must be flagged for manual review.
    pub fn needs_review(&self) -> bool {
        self.severity() == Severity::Review
    }
}

/// Parse a purchase date as entered: `YYYY-MM-DD`, or a full timestamp
/// whose date part is used.
pub(crate) fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| rma_entity::timestamp::parse(raw).map(|dt| dt.date_naive()))
}

/// Eligibility evaluator bound to configuration and a clock.
#[derive(Debug, Clone)]
pub struct EligibilityEvaluator {
    config: EligibilityConfig,
    clock: Arc<dyn Clock>,
}

impl EligibilityEvaluator {
    /// Creates a new evaluator.
    pub fn new(config: EligibilityConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Repair warranty verdict as of today.
    pub fn warranty(&self, purchase_date: &str) -> EligibilityVerdict {
        evaluate_warranty(purchase_date, self.clock.today(), self.config.warranty_years)
    }

    /// Return window verdict as of today.
    pub fn return_window(&self, purchase_date: &str) -> EligibilityVerdict {
        evaluate_return(
            purchase_date,
            self.clock.today(),
            self.config.return_window_days,
        )
    }

    /// The verdict that applies to a request type.
    pub fn for_record_type(&self, record_type: RecordType, purchase_date: &str) -> EligibilityVerdict {
        match record_type {
            RecordType::Repair => self.warranty(purchase_date),
            RecordType::Return => self.return_window(purchase_date),
        }
    }
}
