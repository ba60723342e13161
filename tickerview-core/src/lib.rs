//! tickerview core: domain types, calendar, price providers, transforms.
//!
//! This crate holds everything that does not touch the filesystem:
//! - Domain types (observations, series, day slices, day metrics)
//! - Business-day lookback arithmetic
//! - The `PriceProvider` trait and the Tiingo IEX implementation
//! - Timezone conversion and per-day percent-of-open enrichment
//! - The qualitative line palette

pub mod calendar;
pub mod data;
pub mod domain;
pub mod palette;
pub mod transform;
