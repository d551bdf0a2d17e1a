//! Repair warranty window.

use chrono::{Datelike, NaiveDate};

use super::{EligibilityReason, EligibilityVerdict, parse_purchase_date};

/// The earliest purchase date still under warranty: `today` shifted back
/// exactly `years` calendar years. Feb 29 shifted onto a non-leap year
/// lands on Feb 28 of that year, never on Mar 1.
pub fn warranty_cutoff(today: NaiveDate, years: i32) -> NaiveDate {
    let year = today.year() - years;
    today.with_year(year).unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(year, 2, 28).unwrap_or(today)
    })
}

/// Evaluate the repair warranty for a purchase date as of `today`.
pub fn evaluate_warranty(purchase_date: &str, today: NaiveDate, years: i32) -> EligibilityVerdict {
    if purchase_date.trim().is_empty() {
        return EligibilityVerdict::new(
            false,
            EligibilityReason::MissingDate,
            "Please provide the purchase date.",
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

    if purchased >= warranty_cutoff(today, years) {
        EligibilityVerdict::new(
            true,
            EligibilityReason::InWarranty,
            format!("Product in warranty (within {years} years)."),
        )
    } else {
        EligibilityVerdict::new(
            false,
            EligibilityReason::OutOfWarranty,
            format!(
                "This product may be out of warranty (over {years} years). Your request will be reviewed."
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::Severity;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn iso(d: NaiveDate) -> String {
        d.format("%Y-%m-%d").to_string()
    }

    #[test]
    fn test_purchase_today_is_in_warranty() {
        let today = date(2025, 6, 15);
        let verdict = evaluate_warranty(&iso(today), today, 2);
        assert!(verdict.ok);
        assert_eq!(verdict.reason.as_str(), "in_warranty");
        assert_eq!(verdict.severity(), Severity::Eligible);
    }

    #[test]
    fn test_three_years_ago_is_out_of_warranty() {
        let today = date(2025, 6, 15);
        let verdict = evaluate_warranty("2022-06-15", today, 2);
        assert!(!verdict.ok);
        assert_eq!(verdict.reason.as_str(), "out_of_warranty");
        assert!(verdict.needs_review());
    }

    #[test]
    fn test_empty_date_is_missing() {
        let verdict = evaluate_warranty("  ", date(2025, 6, 15), 2);
        assert!(!verdict.ok);
        assert_eq!(verdict.reason.as_str(), "missing_date");
        assert_eq!(verdict.message, "Please provide the purchase date.");
        assert!(verdict.is_blocking());
    }

    #[test]
    fn test_future_date_is_hard_rejection() {
        let today = date(2025, 6, 15);
        let verdict = evaluate_warranty("2025-06-16", today, 2);
        assert_eq!(verdict.reason, EligibilityReason::FutureDate);
        assert_eq!(verdict.message, "The purchase date cannot be in the future.");
        assert!(verdict.is_blocking());
    }

    #[test]
    fn test_boundary_around_two_years() {
        for today in [date(2025, 6, 15), date(2025, 1, 1), date(2024, 12, 31)] {
            let cutoff = warranty_cutoff(today, 2);
            let inside = cutoff + Duration::days(1);
            let outside = cutoff - Duration::days(1);
            assert!(evaluate_warranty(&iso(inside), today, 2).ok, "{today}");
            assert!(evaluate_warranty(&iso(cutoff), today, 2).ok, "{today}");
            assert_eq!(
                evaluate_warranty(&iso(outside), today, 2).reason,
                EligibilityReason::OutOfWarranty,
                "{today}"
            );
        }
    }

    #[test]
    fn test_leap_day_cutoff_is_feb_28() {
        assert_eq!(warranty_cutoff(date(2024, 2, 29), 2), date(2022, 2, 28));
        assert_eq!(warranty_cutoff(date(2024, 2, 29), 4), date(2020, 2, 29));
        assert_eq!(warranty_cutoff(date(2024, 3, 1), 2), date(2022, 3, 1));
    }

    #[test]
    fn test_leap_day_boundary_verdicts() {
        let today = date(2024, 2, 29);
        assert!(evaluate_warranty("2022-02-28", today, 2).ok);
        assert!(!evaluate_warranty("2022-02-27", today, 2).ok);
    }

    #[test]
    fn test_garbage_date_is_blocked() {
        let verdict = evaluate_warranty("31/12/2024", date(2025, 1, 1), 2);
        assert_eq!(verdict.reason, EligibilityReason::InvalidDate);
        assert!(verdict.is_blocking());
    }

    #[test]
    fn test_verdict_is_deterministic() {
        let today = date(2025, 6, 15);
        assert_eq!(
            evaluate_warranty("2024-01-01", today, 2),
            evaluate_warranty("2024-01-01", today, 2)
        );
    }
}
