//! Price provider trait and structured error types.
//!
//! The PriceProvider trait abstracts over data sources (the Tiingo IEX
//! endpoint in production) so the pipeline can be driven by a mock in tests.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::PriceSeries;

/// Structured error types for data operations.
///
/// Every variant is fatal to a report run; there is no retry layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("unexpected HTTP status {status} for {symbol}")]
    HttpStatus { symbol: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

/// Trait for intraday price providers.
pub trait PriceProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch intraday observations for a symbol over an inclusive date range.
    ///
    /// One call issues exactly one request. Any non-success response is an
    /// error; partial results are never returned.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError>;
}
