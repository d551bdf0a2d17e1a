//! Progress stage derivation.

use rma_entity::ticket::RecordType;

use super::Signals;

/// The canonical four-step lifecycle shown as a progress bar.
pub const STAGES: [&str; 4] = ["Submitted", "Approved", "In Repair", "Completed"];

/// Index into [`STAGES`] for a ticket.
///
/// A rejection anchors at the `Approved` step and is flagged by the theme
/// instead of advancing further.
pub fn stage_index(record_type: RecordType, status: Option<&str>, technical: Option<&str>) -> usize {
    let signals = Signals::read(record_type, status, technical);
    if signals.completed {
        3
    } else if signals.in_repair {
        2
    } else if signals.approved || signals.rejected {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repair(status: &str, tech: Option<&str>) -> usize {
        stage_index(RecordType::Repair, Some(status), tech)
    }

    #[test]
    fn test_stage_sequence() {
        assert_eq!(repair("pending", None), 0);
        assert_eq!(repair("pending", Some("Approved")), 1);
        assert_eq!(repair("approved", None), 1);
        assert_eq!(repair("in-repair", Some("Pending")), 2);
        assert_eq!(repair("approved", Some("In Repair")), 2);
        assert_eq!(repair("completed", None), 3);
        assert_eq!(repair("in-repair", Some("Completed")), 3);
        assert_eq!(repair("pending", Some("Closed")), 3);
    }

    #[test]
    fn test_rejection_anchors_at_approved() {
        assert_eq!(repair("pending", Some("Rejected")), 1);
        assert_eq!(repair("rejected", None), 1);
    }

    #[test]
    fn test_missing_values_are_submitted() {
        assert_eq!(stage_index(RecordType::Repair, None, None), 0);
        assert_eq!(repair("", Some("  ")), 0);
        assert_eq!(repair("something-else", Some("weird")), 0);
    }

    #[test]
    fn test_stage_never_regresses_as_signals_accumulate() {
        let statuses = ["pending", "approved", "in-repair", "completed", "rejected"];
        let techs = [
            None,
            Some("Pending"),
            Some("Approved"),
            Some("In Repair"),
            Some("Completed"),
            Some("Rejected"),
        ];
        for status in statuses {
            for tech in techs {
                let with_tech = repair(status, tech);
                let status_only = repair(status, None);
                assert!(with_tech >= status_only, "{status} / {tech:?}");
            }
        }
    }
}
