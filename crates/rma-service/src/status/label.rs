//! Display labels and badge text.

use super::normalize;

/// Separator between the customer and technical parts of a badge.
pub const BADGE_SEPARATOR: &str = " • ";

/// Title-cased display text for a raw status. Unrecognised values pass
/// through trimmed; absent or blank values render as `-`.
pub fn pretty_label(raw: Option<&str>) -> String {
    let trimmed = raw.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return "-".to_string();
    }

    let label = match normalize(Some(trimmed)).as_str() {
        "PENDING" => "Pending",
        "IN-REPAIR" | "IN REPAIR" => "In Repair",
        "COMPLETED" => "Completed",
        "CLOSED" => "Closed",
        "APPROVED" => "Approved",
        "REJECTED" | "REJECT" => "Rejected",
        _ => trimmed,
    };
    label.to_string()
}

/// Whether the technical status deserves its own badge: it is set and does
/// not read the same as the customer status.
pub fn show_technical_badge(status: Option<&str>, technical: Option<&str>) -> bool {
    let Some(tech) = technical.filter(|t| !t.trim().is_empty()) else {
        return false;
    };
    normalize(Some(&pretty_label(status))) != normalize(Some(&pretty_label(Some(tech))))
}

/// Combined badge text: `Status`, or `Status • Technical` when the
/// technical status adds information.
pub fn badge_text(status: Option<&str>, technical: Option<&str>) -> String {
    let status_label = pretty_label(status);
    if show_technical_badge(status, technical) {
        format!("{status_label}{BADGE_SEPARATOR}{}", pretty_label(technical))
    } else {
        status_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_label_known_tokens() {
        assert_eq!(pretty_label(Some("in-repair")), "In Repair");
        assert_eq!(pretty_label(Some(" IN REPAIR ")), "In Repair");
        assert_eq!(pretty_label(Some("reject")), "Rejected");
        assert_eq!(pretty_label(Some("closed")), "Closed");
    }

    #[test]
    fn test_pretty_label_passthrough() {
        assert_eq!(pretty_label(Some("  refunded ")), "refunded");
        assert_eq!(pretty_label(Some("")), "-");
        assert_eq!(pretty_label(None), "-");
    }

    #[test]
    fn test_badge_never_duplicates() {
        let both = badge_text(Some("Completed"), Some("Completed"));
        let single = badge_text(Some("Completed"), None);
        assert_eq!(both, "Completed");
        assert_eq!(both, single);
        assert_eq!(badge_text(Some("in-repair"), Some("In Repair")), "In Repair");
        assert_eq!(badge_text(Some("completed"), Some("  ")), "Completed");
    }

    #[test]
    fn test_badge_concatenates_distinct_values() {
        assert_eq!(badge_text(Some("approved"), Some("Pending")), "Approved • Pending");
        assert_eq!(badge_text(None, Some("Pending")), "- • Pending");
    }
}
