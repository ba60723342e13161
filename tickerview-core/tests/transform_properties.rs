//! Property tests for the intraday transform.
//!
//! Uses proptest to verify:
//! 1. Partition: every observation lands in exactly the slice of its local date
//! 2. Opening anchor: each slice's earliest observation is 0% of open
//! 3. Metrics: opening/closing/min/max follow their definitions
//! 4. Ordering: slices ascend by date, observations ascend within a slice

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;
use std::collections::BTreeMap;
use tickerview_core::domain::{PriceObservation, PriceSeries};
use tickerview_core::transform::{enrich, to_local_naive};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

/// Minutes after 2024-03-04T00:00Z, spanning about a week (crosses the
/// 2024-03-10 DST switch in US/Central).
fn arb_observation() -> impl Strategy<Value = PriceObservation> {
    (0i64..(8 * 24 * 60), arb_price(), arb_price()).prop_map(|(minutes, open, close)| {
        let base = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        let ts: DateTime<FixedOffset> = (base + Duration::minutes(minutes)).fixed_offset();
        PriceObservation {
            timestamp: ts,
            open,
            close,
        }
    })
}

fn arb_series() -> impl Strategy<Value = PriceSeries> {
    prop::collection::vec(arb_observation(), 1..120).prop_map(|obs| PriceSeries::new("AAPL", obs))
}

fn central() -> Tz {
    "US/Central".parse().unwrap()
}

proptest! {
    /// Every source observation appears exactly once, under its own local
    /// date, in the series' instant order.
    #[test]
    fn slices_partition_observations(series in arb_series()) {
        let tz = central();
        let enriched = enrich(&series, tz);

        let mut expected: BTreeMap<NaiveDate, Vec<(NaiveDateTime, f64, f64)>> = BTreeMap::new();
        for o in series.observations() {
            let local = to_local_naive(&o.timestamp, tz);
            expected.entry(local.date()).or_default().push((local, o.open, o.close));
        }

        prop_assert_eq!(enriched.day_count(), expected.len());
        let total: usize = enriched.days.iter().map(|d| d.len()).sum();
        prop_assert_eq!(total, series.len());

        for day in &enriched.days {
            prop_assert!(!day.is_empty());
            let got: Vec<(NaiveDateTime, f64, f64)> = day
                .observations()
                .iter()
                .map(|o| (o.local_time, o.open, o.close))
                .collect();
            prop_assert_eq!(&got, &expected[&day.date()]);
            for o in day.observations() {
                prop_assert_eq!(o.date, day.date());
            }
        }
    }

    /// The earliest observation of every day is the 0% anchor.
    #[test]
    fn opening_observation_is_zero_percent(series in arb_series()) {
        let enriched = enrich(&series, central());
        for day in &enriched.days {
            prop_assert!(day.opening().percent_of_open_price.abs() < 1e-9);
            for o in day.observations() {
                let expected = (o.open / day.opening().open - 1.0) * 100.0;
                prop_assert!((o.percent_of_open_price - expected).abs() < 1e-9);
            }
        }
    }

    /// Opening = first open, closing = last close, min/max over opens.
    #[test]
    fn metrics_match_definitions(series in arb_series()) {
        let enriched = enrich(&series, central());
        for day in &enriched.days {
            let m = day.metrics();
            let opens: Vec<f64> = day.observations().iter().map(|o| o.open).collect();
            prop_assert_eq!(m.opening_price, opens[0]);
            prop_assert_eq!(m.closing_price, day.observations().last().unwrap().close);
            prop_assert_eq!(m.min_price, opens.iter().cloned().fold(f64::INFINITY, f64::min));
            prop_assert_eq!(m.max_price, opens.iter().cloned().fold(f64::NEG_INFINITY, f64::max));
            prop_assert!(m.min_price <= m.opening_price && m.opening_price <= m.max_price);
        }
    }

    /// Days ascend strictly; local times within a day follow instant order.
    #[test]
    fn days_ascend(series in arb_series()) {
        let enriched = enrich(&series, central());
        for pair in enriched.days.windows(2) {
            prop_assert!(pair[0].date() < pair[1].date());
        }
        prop_assert_eq!(enriched.first_date(), enriched.days.first().map(|d| d.date()));
        // The generated window only crosses a spring-forward switch, so
        // instant order and wall-clock order agree.
        for day in &enriched.days {
            for pair in day.observations().windows(2) {
                prop_assert!(pair[0].local_time <= pair[1].local_time);
            }
        }
    }
}
