//! Static dashboard page over a run summary.
//!
//! One collapsible section per ticker: the combined chart with averages over
//! the reported days, then each day (newest first) with its own stats and
//! chart. Chart paths in the summary are relative to the docs directory,
//! which is where the dashboard is written.

use std::path::{Path, PathBuf};
use tracing::info;

use super::format::{escape_html, fraction_percent, money};
use super::summary::{DayRecord, RunSummary, SummaryError, TickerSummary};

/// Derived figures for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayStats {
    pub opening_price: f64,
    pub closing_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// `max - open`
    pub biggest_jump: f64,
    /// `min - open`
    pub biggest_dip: f64,
    /// Jump as a fraction of the opening price.
    pub biggest_jump_fraction: f64,
    pub biggest_dip_fraction: f64,
}

impl DayStats {
    pub fn from_record(record: &DayRecord) -> Self {
        let biggest_jump = record.max_price - record.opening_price;
        let biggest_dip = record.min_price - record.opening_price;
        Self {
            opening_price: record.opening_price,
            closing_price: record.closing_price,
            min_price: record.min_price,
            max_price: record.max_price,
            biggest_jump,
            biggest_dip,
            biggest_jump_fraction: biggest_jump / record.opening_price,
            biggest_dip_fraction: biggest_dip / record.opening_price,
        }
    }
}

/// Means of each [`DayStats`] field across a ticker's days.
pub type TickerAverages = DayStats;

pub fn ticker_averages(summary: &TickerSummary) -> Option<TickerAverages> {
    let days: Vec<DayStats> = summary.date_data.values().map(DayStats::from_record).collect();
    if days.is_empty() {
        return None;
    }
    let mean = |f: &dyn Fn(&DayStats) -> f64| days.iter().map(f).sum::<f64>() / days.len() as f64;
    Some(DayStats {
        opening_price: mean(&|d| d.opening_price),
        closing_price: mean(&|d| d.closing_price),
        min_price: mean(&|d| d.min_price),
        max_price: mean(&|d| d.max_price),
        biggest_jump: mean(&|d| d.biggest_jump),
        biggest_dip: mean(&|d| d.biggest_dip),
        biggest_jump_fraction: mean(&|d| d.biggest_jump_fraction),
        biggest_dip_fraction: mean(&|d| d.biggest_dip_fraction),
    })
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 1em; }
details { border: 1px solid #ddd; border-radius: 4px; margin-bottom: 0.5em; }
summary { cursor: pointer; padding: 0.4em 0.6em; font-weight: bold; font-size: 1.2em; }
.ticker-content { display: flex; flex-wrap: wrap; gap: 1em; padding: 0.5em; }
.stats-and-chart { display: flex; align-items: flex-start; gap: 0.5em; margin-bottom: 0.5em; }
.stats-table td { padding: 1px 6px; font-size: 0.9em; }
.chart-iframe { width: 420px; height: 270px; border: 0; }
"#;

fn stats_table(rows: &[(&str, String)]) -> String {
    let mut html = String::from("<table class=\"stats-table\">\n");
    for (label, value) in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(label),
            escape_html(value)
        ));
    }
    html.push_str("</table>\n");
    html
}

fn iframe(src: &str) -> String {
    format!(
        "<iframe class=\"chart-iframe\" src=\"{}\" sandbox=\"allow-same-origin allow-scripts\" scrolling=\"no\"></iframe>\n",
        escape_html(src)
    )
}

fn day_section(date: &str, record: &DayRecord) -> String {
    let stats = DayStats::from_record(record);
    let table = stats_table(&[
        ("Date", date.to_string()),
        ("Opening Price", money(stats.opening_price)),
        ("Closing Price", money(stats.closing_price)),
        ("Min Price", money(stats.min_price)),
        ("Max Price", money(stats.max_price)),
        ("Biggest Jump", money(stats.biggest_jump)),
        ("Biggest Dip", money(stats.biggest_dip)),
        ("Biggest Jump %", fraction_percent(stats.biggest_jump_fraction)),
        ("Biggest Dip %", fraction_percent(stats.biggest_dip_fraction)),
    ]);
    format!(
        "<div class=\"stats-and-chart\">\n{table}{}</div>\n",
        iframe(&record.html_file)
    )
}

fn ticker_section(symbol: &str, summary: &TickerSummary) -> String {
    let mut html = format!(
        "<details class=\"ticker\">\n<summary>{}</summary>\n<div class=\"ticker-content\">\n",
        escape_html(symbol)
    );

    html.push_str("<div class=\"stats-and-chart\">\n");
    if let Some(avg) = ticker_averages(summary) {
        html.push_str(&stats_table(&[
            ("Mean Opening Price", money(avg.opening_price)),
            ("Mean Closing Price", money(avg.closing_price)),
            ("Mean Min Price", money(avg.min_price)),
            ("Mean Max Price", money(avg.max_price)),
            ("Mean Biggest Jump", money(avg.biggest_jump)),
            ("Mean Biggest Dip", money(avg.biggest_dip)),
            ("Mean Biggest Jump %", fraction_percent(avg.biggest_jump_fraction)),
            ("Mean Biggest Dip %", fraction_percent(avg.biggest_dip_fraction)),
        ]));
    }
    if let Some(combined) = &summary.combined_date_html_file {
        html.push_str(&iframe(combined));
    }
    html.push_str("</div>\n<div class=\"all-dates\">\n");

    for (date, record) in summary.date_data.iter().rev() {
        html.push_str(&day_section(date, record));
    }
    html.push_str("</div>\n</div>\n</details>\n");
    html
}

/// Render the whole page.
pub fn render_dashboard(summary: &RunSummary) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Ticker Report</title>\n<style>",
    );
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    for (symbol, ticker) in summary.iter() {
        html.push_str(&ticker_section(symbol, ticker));
    }
    html.push_str("</body>\n</html>\n");
    html
}

pub fn write_dashboard(summary: &RunSummary, path: &Path) -> Result<PathBuf, SummaryError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SummaryError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, render_dashboard(summary)).map_err(|source| SummaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), tickers = summary.len(), "wrote dashboard");
    Ok(path.to_path_buf())
}
