//! Timezone conversion and per-day enrichment.
//!
//! Each timestamp is converted to the target timezone and the offset is then
//! dropped: downstream code works on naive wall-clock time. Across a DST
//! transition two distinct instants can therefore share a wall-clock time.
//! Ordering always follows the original instant.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use std::collections::BTreeMap;

use crate::domain::{DaySlice, EnrichedSeries, LocalObservation, PriceSeries};

/// Wall-clock time of `timestamp` in `tz`, offset discarded.
pub fn to_local_naive(timestamp: &DateTime<FixedOffset>, tz: Tz) -> NaiveDateTime {
    timestamp.with_timezone(&tz).naive_local()
}

/// `(open / opening_open - 1) * 100`.
pub fn percent_of_open(open: f64, opening_open: f64) -> f64 {
    (open / opening_open - 1.0) * 100.0
}

/// Convert, group by local date and compute percent-of-open.
///
/// Days come out ascending by date; observations within a day keep the
/// series' timestamp order, so the first one is the day's opening quote.
pub fn enrich(series: &PriceSeries, tz: Tz) -> EnrichedSeries {
    let mut groups: BTreeMap<NaiveDate, Vec<LocalObservation>> = BTreeMap::new();

    for obs in series.observations() {
        let local_time = to_local_naive(&obs.timestamp, tz);
        let date = local_time.date();
        let time_of_day = local_time.time();
        groups.entry(date).or_default().push(LocalObservation {
            local_time,
            date,
            date_string: date.format("%Y-%m-%d").to_string(),
            time_of_day,
            time_of_day_string: time_of_day.format("%H:%M").to_string(),
            open: obs.open,
            close: obs.close,
            percent_of_open_price: 0.0,
        });
    }

    let days = groups
        .into_iter()
        .filter_map(|(date, mut observations)| {
            let opening_open = observations.first()?.open;
            for o in &mut observations {
                o.percent_of_open_price = percent_of_open(o.open, opening_open);
            }
            DaySlice::new(date, observations)
        })
        .collect();

    EnrichedSeries {
        symbol: series.symbol.clone(),
        days,
    }
}
