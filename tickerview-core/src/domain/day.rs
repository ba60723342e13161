//! DaySlice: one calendar day of enriched observations for a symbol.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::observation::TickerSymbol;

/// An observation after timezone conversion and per-day enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalObservation {
    /// Wall-clock time in the target timezone, offset discarded.
    pub local_time: NaiveDateTime,
    pub date: NaiveDate,
    /// `%Y-%m-%d`
    pub date_string: String,
    pub time_of_day: NaiveTime,
    /// `%H:%M`
    pub time_of_day_string: String,
    pub open: f64,
    pub close: f64,
    /// `(open / day's opening open - 1) * 100`
    pub percent_of_open_price: f64,
}

/// Opening/closing/min/max for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayMetrics {
    pub opening_price: f64,
    pub closing_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

/// Observations sharing one truncated date, in timestamp order.
///
/// Never empty: the only constructor rejects an empty group.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySlice {
    date: NaiveDate,
    observations: Vec<LocalObservation>,
}

impl DaySlice {
    /// Returns `None` for an empty group.
    pub fn new(date: NaiveDate, observations: Vec<LocalObservation>) -> Option<Self> {
        if observations.is_empty() {
            return None;
        }
        Some(Self { date, observations })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn observations(&self) -> &[LocalObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Never true for a constructed slice.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Earliest observation of the day.
    pub fn opening(&self) -> &LocalObservation {
        &self.observations[0]
    }

    /// Latest observation of the day.
    pub fn closing(&self) -> &LocalObservation {
        &self.observations[self.observations.len() - 1]
    }

    pub fn metrics(&self) -> DayMetrics {
        let (min_price, max_price) = self
            .observations
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), o| {
                (lo.min(o.open), hi.max(o.open))
            });
        DayMetrics {
            opening_price: self.opening().open,
            closing_price: self.closing().close,
            min_price,
            max_price,
        }
    }
}

/// A symbol's observations split into days, ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSeries {
    pub symbol: TickerSymbol,
    pub days: Vec<DaySlice>,
}

impl EnrichedSeries {
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(DaySlice::date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(DaySlice::date)
    }

    /// All observations across days, in timestamp order.
    pub fn observations(&self) -> impl Iterator<Item = &LocalObservation> {
        self.days.iter().flat_map(|d| d.observations().iter())
    }
}
