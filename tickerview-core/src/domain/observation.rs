//! PriceObservation and PriceSeries: raw intraday quotes as fetched.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Ticker symbol as configured (e.g. "AAPL").
pub type TickerSymbol = String;

/// One timestamped intraday quote.
///
/// The timestamp keeps the offset reported by the provider; conversion to
/// the display timezone happens in [`crate::transform`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub timestamp: DateTime<FixedOffset>,
    pub open: f64,
    pub close: f64,
}

/// All observations for one symbol over the lookback window, sorted
/// ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: TickerSymbol,
    observations: Vec<PriceObservation>,
}

impl PriceSeries {
    /// Build a series, sorting observations by timestamp.
    ///
    /// The sort is stable, so observations sharing a timestamp keep the
    /// provider's order.
    pub fn new(symbol: impl Into<TickerSymbol>, mut observations: Vec<PriceObservation>) -> Self {
        observations.sort_by_key(|o| o.timestamp);
        Self {
            symbol: symbol.into(),
            observations,
        }
    }

    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(ts: &str, open: f64) -> PriceObservation {
        PriceObservation {
            timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
            open,
            close: open,
        }
    }

    #[test]
    fn new_sorts_by_timestamp() {
        let series = PriceSeries::new(
            "AAPL",
            vec![
                obs("2024-03-04T15:00:00Z", 3.0),
                obs("2024-03-04T14:30:00Z", 1.0),
                obs("2024-03-04T14:35:00Z", 2.0),
            ],
        );
        let opens: Vec<f64> = series.observations().iter().map(|o| o.open).collect();
        assert_eq!(opens, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn sort_uses_instant_not_wall_clock() {
        // 09:00-05:00 is 14:00Z, earlier than 14:30Z despite the larger wall-clock hour.
        let series = PriceSeries::new(
            "AAPL",
            vec![
                obs("2024-03-04T14:30:00Z", 2.0),
                obs("2024-03-04T09:00:00-05:00", 1.0),
            ],
        );
        assert_eq!(series.observations()[0].open, 1.0);
    }

    #[test]
    fn empty_series() {
        let series = PriceSeries::new("AAPL", vec![]);
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }
}
