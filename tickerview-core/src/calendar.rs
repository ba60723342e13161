//! Business-day arithmetic for the lookback window.
//!
//! Business days are Monday through Friday. There is no holiday calendar:
//! a market holiday counts as a business day and simply yields no data.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The date `n` business days before `today`.
///
/// Walks back one calendar day at a time, counting only weekdays. From a
/// weekend, one business day back is the preceding Friday. `n == 0`
/// returns `today` unchanged.
pub fn nth_previous_business_day(today: NaiveDate, n: u32) -> NaiveDate {
    let mut date = today;
    let mut remaining = n;
    while remaining > 0 {
        date -= Duration::days(1);
        if is_business_day(date) {
            remaining -= 1;
        }
    }
    date
}

/// Inclusive `[start, end]` request window ending at `today`.
pub fn lookback_window(today: NaiveDate, business_days: u32) -> (NaiveDate, NaiveDate) {
    (nth_previous_business_day(today, business_days), today)
}
