use chrono::{Months, NaiveDate, NaiveDateTime, Utc};

use crate::constants::DEFAULT_LOOKBACK_YEARS;

/// Current UTC wall-clock time, used for created/updated timestamps.
pub fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Today's calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Truncates a timestamp to its calendar day.
///
/// All progress uniqueness checks compare the result of this function, so two
/// timestamps on the same day are the same slot regardless of time-of-day.
pub fn calendar_day(timestamp: NaiveDateTime) -> NaiveDate {
    timestamp.date()
}

/// Start of the default reporting window ending at `today`.
pub fn default_range_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(12 * DEFAULT_LOOKBACK_YEARS))
        .unwrap_or(NaiveDate::MIN)
}
