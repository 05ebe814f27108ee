use chrono::NaiveDate;
use tracing::warn;

use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;

/// Substituted when a stored due date does not parse. Far outside any day
/// count the dashboard produces, so downstream consumers can tell it apart.
pub const INVALID_DATE_DAYS: i64 = -999;

pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Whole days between `today` and the due date. Positive means the payment is
/// still in the future, zero means it is due today, negative means it is late.
/// An unparseable input yields [`INVALID_DATE_DAYS`], never an error.
pub fn days_until(raw_due_date: &str, today: NaiveDate) -> i64 {
    match parse_due_date(raw_due_date) {
        Some(due_date) => (due_date - today).num_days(),
        None => {
            warn!(
                raw_due_date,
                "due_dates: unparseable due date, substituting sentinel day count"
            );
            INVALID_DATE_DAYS
        }
    }
}

/// Future due date means the client is in good standing, due today is pending,
/// anything in the past is overdue. An unparseable date is treated as overdue
/// so a broken row surfaces in the most urgent bucket.
pub fn derive_payment_status(raw_due_date: &str, today: NaiveDate) -> PaymentStatus {
    match parse_due_date(raw_due_date) {
        Some(due_date) if due_date > today => PaymentStatus::Paid,
        Some(due_date) if due_date == today => PaymentStatus::Pending,
        Some(_) => PaymentStatus::Overdue,
        None => {
            warn!(
                raw_due_date,
                "due_dates: unparseable due date, defaulting status to overdue"
            );
            PaymentStatus::Overdue
        }
    }
}

pub fn format_days_remaining(days: i64) -> String {
    if days == INVALID_DATE_DAYS {
        return "invalid date".to_string();
    }

    if days > 0 {
        format!("{} days remaining", days)
    } else if days == 0 {
        "due today".to_string()
    } else {
        format!("overdue by {} days", days.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn date(offset_days: i64) -> String {
        (today() + chrono::Duration::days(offset_days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn status_boundaries_around_today() {
        assert_eq!(
            derive_payment_status(&date(1), today()),
            PaymentStatus::Paid
        );
        assert_eq!(
            derive_payment_status(&date(0), today()),
            PaymentStatus::Pending
        );
        assert_eq!(
            derive_payment_status(&date(-1), today()),
            PaymentStatus::Overdue
        );
    }

    #[test]
    fn days_until_and_status_agree_in_sign() {
        for offset in [-30, -2, -1, 0, 1, 7, 15, 365] {
            let raw = date(offset);
            let days = days_until(&raw, today());
            let status = derive_payment_status(&raw, today());

            assert_eq!(days, offset);
            match status {
                PaymentStatus::Paid => assert!(days > 0),
                PaymentStatus::Pending => assert_eq!(days, 0),
                PaymentStatus::Overdue => assert!(days < 0),
            }
        }
    }

    #[test]
    fn unparseable_due_date_degrades_without_panicking() {
        for raw in ["not-a-date", "", "2025-13-45", "15/06/2025"] {
            assert_eq!(days_until(raw, today()), INVALID_DATE_DAYS);
            assert_eq!(derive_payment_status(raw, today()), PaymentStatus::Overdue);
        }
        assert_eq!(format_days_remaining(INVALID_DATE_DAYS), "invalid date");
    }

    #[test]
    fn remaining_labels_for_each_bucket() {
        assert_eq!(format_days_remaining(15), "15 days remaining");
        assert_eq!(format_days_remaining(1), "1 days remaining");
        assert_eq!(format_days_remaining(0), "due today");
        assert_eq!(format_days_remaining(-2), "overdue by 2 days");
    }

    #[test]
    fn date_input_tolerates_surrounding_whitespace() {
        assert_eq!(days_until(" 2025-06-16 ", today()), 1);
    }
}
