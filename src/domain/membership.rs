use chrono::{Months, NaiveDate};

/// Expiry date for a new membership.
///
/// `Monthly` runs one calendar month, `Annual` one year; any other type has
/// no expiry. Month arithmetic clamps to the last day of the target month.
pub fn membership_expiry(membership_type: &str, joined_on: NaiveDate) -> Option<NaiveDate> {
    match membership_type {
        "Monthly" => joined_on.checked_add_months(Months::new(1)),
        "Annual" => joined_on.checked_add_months(Months::new(12)),
        _ => None,
    }
}
