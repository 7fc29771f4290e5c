//! Circulation rules: copy/fine status values and the overdue fine.

use chrono::NaiveDate;

/// Currency units charged per day late.
pub const DEFAULT_FINE_RATE_PER_DAY: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    Available,
    OnLoan,
}

impl CopyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CopyStatus::Available => "Available",
            CopyStatus::OnLoan => "On Loan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FineStatus {
    Unpaid,
    Paid,
}

impl FineStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FineStatus::Unpaid => "Unpaid",
            FineStatus::Paid => "Paid",
        }
    }
}

/// Whole calendar days between `due_date` and `returned_on`, zero when on time.
pub fn days_overdue(due_date: NaiveDate, returned_on: NaiveDate) -> i64 {
    (returned_on - due_date).num_days().max(0)
}

/// Fine owed for a return, `None` when the copy came back on or before the due date.
pub fn fine_amount(due_date: NaiveDate, returned_on: NaiveDate, rate_per_day: i64) -> Option<i64> {
    match days_overdue(due_date, returned_on) {
        0 => None,
        days => Some(days * rate_per_day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn three_days_late_costs_fifteen() {
        assert_eq!(
            fine_amount(date(2024, 3, 1), date(2024, 3, 4), DEFAULT_FINE_RATE_PER_DAY),
            Some(15)
        );
    }

    #[test]
    fn on_time_or_early_is_free() {
        assert_eq!(fine_amount(date(2024, 3, 1), date(2024, 3, 1), 5), None);
        assert_eq!(fine_amount(date(2024, 3, 1), date(2024, 2, 20), 5), None);
        assert_eq!(days_overdue(date(2024, 3, 1), date(2024, 2, 20)), 0);
    }

    #[test]
    fn crosses_month_and_leap_day() {
        assert_eq!(days_overdue(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(fine_amount(date(2023, 12, 31), date(2024, 1, 1), 5), Some(5));
    }

    #[test]
    fn status_labels_match_stored_values() {
        assert_eq!(CopyStatus::OnLoan.as_str(), "On Loan");
        assert_eq!(CopyStatus::Available.as_str(), "Available");
        assert_eq!(FineStatus::Unpaid.as_str(), "Unpaid");
        assert_eq!(FineStatus::Paid.as_str(), "Paid");
    }
}
