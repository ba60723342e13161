//! Intraday price acquisition

pub mod provider;
pub mod tiingo;

pub use provider::{DataError, PriceProvider};
pub use tiingo::{TiingoProvider, DEFAULT_ENDPOINT_TEMPLATE, DEFAULT_RESAMPLE_FREQ};
