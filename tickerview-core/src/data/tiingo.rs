//! Tiingo IEX intraday price provider.
//!
//! Issues one blocking GET per symbol against a templated endpoint and
//! decodes the JSON array of resampled quotes. Anything other than
//! `200 OK` is fatal; there are no retries.

use super::provider::{DataError, PriceProvider};
use crate::domain::{PriceObservation, PriceSeries};
use chrono::{DateTime, FixedOffset, NaiveDate};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ENDPOINT_TEMPLATE: &str = "https://api.tiingo.com/iex/{ticker_symbol}/prices\
     ?startDate={start_date}&endDate={end_date}&resampleFreq={resample_freq}";

pub const DEFAULT_RESAMPLE_FREQ: &str = "5min";

/// One element of the Tiingo IEX prices response.
///
/// Only the fields the report uses are declared; the rest are ignored.
#[derive(Debug, Deserialize)]
struct IexQuote {
    date: DateTime<FixedOffset>,
    open: f64,
    close: f64,
}

/// Tiingo IEX price provider.
#[derive(Debug)]
pub struct TiingoProvider {
    client: reqwest::blocking::Client,
    endpoint_template: String,
    resample_freq: String,
}

impl TiingoProvider {
    pub fn new(
        endpoint_template: impl Into<String>,
        resample_freq: impl Into<String>,
        token: &str,
    ) -> Result<Self, DataError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Token {token}"))
            .map_err(|e| DataError::ClientSetup(format!("invalid token header: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .map_err(|e| DataError::ClientSetup(e.to_string()))?;

        Ok(Self {
            client,
            endpoint_template: endpoint_template.into(),
            resample_freq: resample_freq.into(),
        })
    }

    /// Fill the endpoint template for a symbol and date range.
    pub fn prices_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        fill_template(&self.endpoint_template, symbol, start, end, &self.resample_freq)
    }

    /// Decode a response body into observations.
    fn parse_response(symbol: &str, body: &str) -> Result<Vec<PriceObservation>, DataError> {
        let quotes: Vec<IexQuote> = serde_json::from_str(body).map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Ok(quotes
            .into_iter()
            .map(|q| PriceObservation {
                timestamp: q.date,
                open: q.open,
                close: q.close,
            })
            .collect())
    }
}

/// Substitute `{ticker_symbol}`, `{start_date}`, `{end_date}` and
/// `{resample_freq}` in an endpoint template. Dates use `%Y-%m-%d`.
pub fn fill_template(
    template: &str,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    resample_freq: &str,
) -> String {
    template
        .replace("{ticker_symbol}", symbol)
        .replace("{start_date}", &start.format("%Y-%m-%d").to_string())
        .replace("{end_date}", &end.format("%Y-%m-%d").to_string())
        .replace("{resample_freq}", resample_freq)
}

impl PriceProvider for TiingoProvider {
    fn name(&self) -> &str {
        "tiingo_iex"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        let url = self.prices_url(symbol, start, end);
        debug!(%url, "fetching intraday prices");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(DataError::HttpStatus {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        let observations = Self::parse_response(symbol, &body)?;
        debug!(symbol, count = observations.len(), "decoded observations");

        Ok(PriceSeries::new(symbol, observations))
    }
}
