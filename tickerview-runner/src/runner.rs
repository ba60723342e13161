//! Report runner: fetch → transform → render → summarize, one ticker at a time.
//!
//! The run is fail-fast. The first error aborts the remaining tickers; chart
//! files already written for earlier tickers stay on disk, but the summary is
//! only written once every ticker has succeeded.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use tickerview_core::calendar::lookback_window;
use tickerview_core::data::{DataError, PriceProvider, TiingoProvider};
use tickerview_core::palette::sample_palette;
use tickerview_core::transform::enrich;

use crate::config::{ConfigError, ReportConfig};
use crate::reporting::charts::{ChartWriter, RenderError};
use crate::reporting::dashboard::write_dashboard;
use crate::reporting::summary::{relative_path, DayRecord, RunSummary, SummaryError};

/// Errors from a report run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("summary error: {0}")]
    Summary(#[from] SummaryError),
    #[error("no price observations returned for '{0}'")]
    EmptySeries(String),
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub summary_path: PathBuf,
    pub dashboard_path: Option<PathBuf>,
    pub charts_written: usize,
}

/// Resolve the API token, then build the Tiingo client.
///
/// A missing token fails here, before any HTTP client exists.
pub fn build_provider(
    config: &ReportConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<TiingoProvider, RunError> {
    let token = config.resolve_token(lookup)?;
    let provider = TiingoProvider::new(
        config.endpoint_template.clone(),
        config.resample_freq.clone(),
        token.expose(),
    )?;
    debug!(provider = provider.name(), "built price provider");
    Ok(provider)
}

/// Run the full report for every configured ticker.
///
/// `today` anchors the lookback window; the binary passes the local date.
pub fn run_report(
    config: &ReportConfig,
    provider: &dyn PriceProvider,
    today: NaiveDate,
) -> Result<RunOutcome, RunError> {
    config.validate()?;
    let tz = config.tz()?;
    let (start, end) = lookback_window(today, config.lookback_business_days);
    info!(
        provider = provider.name(),
        tickers = config.tickers.len(),
        %start,
        %end,
        timezone = %tz,
        "starting report run"
    );

    let writer = ChartWriter::new(&config.output_dir, config.chart_width, config.chart_height)?;
    let mut summary = RunSummary::new();
    let mut charts_written = 0usize;

    for symbol in &config.tickers {
        let series = provider.fetch(symbol, start, end)?;
        info!(symbol = %symbol, observations = series.len(), "fetched prices");
        if series.is_empty() {
            return Err(RunError::EmptySeries(symbol.clone()));
        }

        let enriched = enrich(&series, tz);
        let colors = sample_palette(enriched.day_count());
        let record = summary.begin_ticker(symbol);

        for (day, color) in enriched.days.iter().zip(colors) {
            let artifact = writer.write_day_chart(symbol, day, color)?;
            charts_written += 1;
            let date_key = day.date().format("%Y-%m-%d").to_string();
            debug!(symbol = %symbol, date = %date_key, observations = day.len(), "recorded day");
            record.date_data.insert(
                date_key,
                DayRecord::new(relative_path(&artifact.path, &config.docs_dir), day.metrics()),
            );
        }

        let combined = writer.write_combined_chart(&enriched)?;
        charts_written += 1;
        record.combined_date_html_file = Some(relative_path(&combined.path, &config.docs_dir));
        info!(symbol = %symbol, days = enriched.day_count(), "ticker complete");
    }

    let summary_path = config.summary_path();
    summary.write(&summary_path)?;
    info!(path = %summary_path.display(), tickers = summary.len(), "wrote summary");

    let dashboard_path = if config.write_dashboard {
        Some(write_dashboard(&summary, &config.dashboard_path())?)
    } else {
        None
    };

    Ok(RunOutcome {
        summary,
        summary_path,
        dashboard_path,
        charts_written,
    })
}
