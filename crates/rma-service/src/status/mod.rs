//! Ticket status model.
//!
//! Every view (customer tracking, employee board, technician queue, manager
//! dashboard) derives stage, theme and badge text through this module, from
//! nothing but `(status, technical_status, record_type)`. Raw values are
//! compared case- and whitespace-insensitively because the store does not
//! normalise on write.

pub mod label;
pub mod stage;
pub mod theme;

use serde::Serialize;

use rma_entity::ticket::{RecordType, Ticket};

pub use label::{badge_text, pretty_label, show_technical_badge};
pub use stage::{STAGES, stage_index};
pub use theme::{Theme, technical_theme, theme};

/// Trim and uppercase a raw status for comparison. Absent values become empty.
pub fn normalize(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_uppercase()
}

/// What a pair of raw status values says about a ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Signals {
    pub rejected: bool,
    pub completed: bool,
    pub in_repair: bool,
    pub approved: bool,
    pub pending: bool,
}

impl Signals {
    pub(crate) fn read(record_type: RecordType, status: Option<&str>, technical: Option<&str>) -> Self {
        let status = normalize(status);
        let tech = normalize(technical);

        let is_return = record_type == RecordType::Return;
        Self {
            rejected: status.contains("REJECT") || tech.contains("REJECT"),
            completed: status.contains("COMPLETED")
                || status.contains("CLOSED")
                || tech.contains("COMPLETED")
                || tech.contains("CLOSED")
                || (is_return && status.contains("REFUNDED")),
            in_repair: mentions_in_repair(&status) || mentions_in_repair(&tech),
            approved: status == "APPROVED" || tech.contains("APPROV"),
            pending: status.contains("PENDING")
                || tech.contains("PENDING")
                || (is_return && status.contains("REQUESTED")),
        }
    }
}

fn mentions_in_repair(normalized: &str) -> bool {
    ["IN-REPAIR", "IN REPAIR", "IN_REPAIR"]
        .iter()
        .any(|token| normalized.contains(token))
}

/// Everything a view shows about a ticket's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    /// Position in [`STAGES`].
    pub stage_index: usize,
    /// Label of the current stage.
    pub stage_label: &'static str,
    /// Overall theme.
    pub theme: Theme,
    /// Display label of the customer status.
    pub status_label: String,
    /// Display label of the technical status, when it is set and differs
    /// from the customer status.
    pub technical_label: Option<String>,
    /// Theme of the technical badge.
    pub technical_theme: Theme,
    /// Combined badge text.
    pub badge: String,
}

impl StatusView {
    /// Derive the view from raw values.
    pub fn derive(record_type: RecordType, status: Option<&str>, technical: Option<&str>) -> Self {
        let stage_index = stage_index(record_type, status, technical);
        Self {
            stage_index,
            stage_label: STAGES[stage_index],
            theme: theme(record_type, status, technical),
            status_label: pretty_label(status),
            technical_label: show_technical_badge(status, technical)
                .then(|| pretty_label(technical)),
            technical_theme: technical_theme(technical),
            badge: badge_text(status, technical),
        }
    }

    /// Derive the view for a ticket.
    pub fn of(ticket: &Ticket) -> Self {
        Self::derive(
            ticket.record_type,
            Some(ticket.status.as_str()),
            ticket.technical_status.as_deref(),
        )
    }

    /// Whether the ticket still needs work (not completed, not rejected).
    pub fn is_open(&self) -> bool {
        self.theme.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Some("  in-repair ")), "IN-REPAIR");
        assert_eq!(normalize(None), "");
    }

    #[test]
    fn test_view_of_fresh_ticket() {
        let view = StatusView::derive(RecordType::Repair, Some("pending"), None);
        assert_eq!(view.stage_index, 0);
        assert_eq!(view.stage_label, "Submitted");
        assert_eq!(view.theme, Theme::Warning);
        assert_eq!(view.badge, "Pending");
        assert_eq!(view.technical_label, None);
        assert_eq!(view.technical_theme, Theme::Neutral);
        assert!(view.is_open());
    }

    #[test]
    fn test_view_with_distinct_technical_status() {
        let view = StatusView::derive(RecordType::Repair, Some("in-repair"), Some("Approved"));
        assert_eq!(view.stage_index, 2);
        assert_eq!(view.theme, Theme::Info);
        assert_eq!(view.technical_label.as_deref(), Some("Approved"));
        assert_eq!(view.technical_theme, Theme::Success);
        assert_eq!(view.badge, "In Repair • Approved");
    }

    #[test]
    fn test_return_ticket_signals() {
        let requested = StatusView::derive(RecordType::Return, Some("requested"), None);
        assert_eq!(requested.theme, Theme::Warning);
        let refunded = StatusView::derive(RecordType::Return, Some("refunded"), None);
        assert_eq!(refunded.theme, Theme::Success);
        assert_eq!(refunded.stage_index, 3);
        assert!(!refunded.is_open());
    }

    #[test]
    fn test_same_inputs_same_view() {
        let a = StatusView::derive(RecordType::Repair, Some("Approved"), Some("In Repair"));
        let b = StatusView::derive(RecordType::Repair, Some(" approved "), Some("in repair"));
        assert_eq!(a.stage_index, b.stage_index);
        assert_eq!(a.theme, b.theme);
    }
}
