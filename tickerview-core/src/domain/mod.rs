//! Domain types for tickerview

pub mod day;
pub mod observation;

pub use day::{DayMetrics, DaySlice, EnrichedSeries, LocalObservation};
pub use observation::{PriceObservation, PriceSeries, TickerSymbol};
