//! Return window.

use chrono::NaiveDate;

use super::{EligibilityReason, EligibilityVerdict, parse_purchase_date};

/// Evaluate return eligibility for a purchase date as of `today`.
///
/// Both dates are compared as calendar days, so the time of day of either
/// never matters. A purchase exactly `window_days` days ago is eligible.
pub fn evaluate_return(purchase_date: &str, today: NaiveDate, window_days: i64) -> EligibilityVerdict {
    if purchase_date.trim().is_empty() {
        return EligibilityVerdict::new(
            false,
            EligibilityReason::MissingDate,
            "Please select the purchase date to check return eligibility.",
        );
    }

    let Some(purchased) = parse_purchase_date(purchase_date) else {
        return EligibilityVerdict::new(
            false,
            EligibilityReason::InvalidDate,
            "The purchase date is not a valid date.",
        );
    };

    if purchased > today {
        return EligibilityVerdict::new(
            false,
            EligibilityReason::FutureDate,
            "The purchase date cannot be in the future.",
        );
    }

    let days_passed = (today - purchased).num_days();
    if days_passed <= window_days {
        EligibilityVerdict::new(
            true,
            EligibilityReason::WithinReturnWindow,
            format!("Eligible for return (within {window_days} days)."),
        )
    } else {
        EligibilityVerdict::new(
            false,
            EligibilityReason::ReturnWindowExceeded,
            format!("Not eligible for return (more than {window_days} days)."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date")
    }

    fn days_ago(n: i64) -> String {
        (today() - Duration::days(n)).format("%Y-%m-%d").to_string()
    }

    #[test]
    fn test_fourteen_days_is_eligible() {
        let verdict = evaluate_return(&days_ago(14), today(), 14);
        assert!(verdict.ok);
        assert_eq!(verdict.message, "Eligible for return (within 14 days).");
    }

    #[test]
    fn test_fifteen_days_is_not_eligible() {
        let verdict = evaluate_return(&days_ago(15), today(), 14);
        assert!(!verdict.ok);
        assert_eq!(verdict.reason, EligibilityReason::ReturnWindowExceeded);
        assert!(verdict.message.contains("more than 14 days"));
        assert!(verdict.needs_review());
    }

    #[test]
    fn test_same_day_and_future() {
        assert!(evaluate_return(&days_ago(0), today(), 14).ok);
        let future = evaluate_return(&days_ago(-1), today(), 14);
        assert_eq!(future.reason, EligibilityReason::FutureDate);
        assert!(future.is_blocking());
    }

    #[test]
    fn test_time_of_day_is_truncated() {
        let verdict = evaluate_return("2025-02-24T23:59:00Z", today(), 14);
        assert!(verdict.ok);
        let verdict = evaluate_return("2025-03-10T23:59:00Z", today(), 14);
        assert!(verdict.ok, "later the same day is not in the future");
    }

    #[test]
    fn test_missing_date() {
        let verdict = evaluate_return("", today(), 14);
        assert_eq!(verdict.reason, EligibilityReason::MissingDate);
    }
}
