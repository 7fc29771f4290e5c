use chrono::NaiveDate;

/// Source of the current calendar date.
///
/// All circulation and membership dates come from here, so the fine and
/// expiry arithmetic never depends on the host time zone.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
