//! Chart artifacts: one HTML file per ticker-day plus one combined file per ticker.

mod combined;
mod day;
pub mod html;
pub mod plot;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tickerview_core::domain::{DaySlice, EnrichedSeries};
use tickerview_core::palette::Rgb;
use tracing::info;

pub use combined::{render_combined_chart, CombinedChart};
pub use day::render_day_chart;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("plot rendering failed: {0}")]
    Plot(String),

    #[error("no observations to chart for {0}")]
    EmptySeries(String),

    #[error("failed to serialize chart data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Day(NaiveDate),
    Combined,
}

/// A chart written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    pub path: PathBuf,
    pub kind: ChartKind,
}

pub fn day_chart_file_name(symbol: &str, date: NaiveDate) -> String {
    format!("{symbol}_{}_plot.html", date.format("%Y-%m-%d"))
}

pub fn combined_chart_file_name(symbol: &str) -> String {
    format!("{symbol}_combined_days_plot.html")
}

/// Renders charts and writes each to its own file under `output_dir`.
#[derive(Debug, Clone)]
pub struct ChartWriter {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl ChartWriter {
    pub fn new(output_dir: impl AsRef<Path>, width: u32, height: u32) -> Result<Self, RenderError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir).map_err(|source| RenderError::Io {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self {
            output_dir,
            width,
            height,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn write_day_chart(
        &self,
        symbol: &str,
        day: &DaySlice,
        color: Rgb,
    ) -> Result<ChartArtifact, RenderError> {
        let html = render_day_chart(symbol, day, color, self.width, self.height)?;
        let path = self.output_dir.join(day_chart_file_name(symbol, day.date()));
        write_file(&path, &html)?;
        info!(symbol, date = %day.date(), path = %path.display(), "wrote day chart");
        Ok(ChartArtifact {
            path,
            kind: ChartKind::Day(day.date()),
        })
    }

    pub fn write_combined_chart(&self, series: &EnrichedSeries) -> Result<ChartArtifact, RenderError> {
        let chart = render_combined_chart(series, self.width, self.height)?;
        let path = self.output_dir.join(combined_chart_file_name(&series.symbol));
        write_file(&path, &chart.html)?;
        info!(
            symbol = %series.symbol,
            days = series.day_count(),
            path = %path.display(),
            "wrote combined chart"
        );
        Ok(ChartArtifact {
            path,
            kind: ChartKind::Combined,
        })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), RenderError> {
    std::fs::write(path, contents).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
