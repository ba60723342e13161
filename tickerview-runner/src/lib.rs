//! tickerview runner: the report pipeline on top of `tickerview-core`.
//!
//! This crate provides:
//! - `ReportConfig` with TOML overrides and token resolution
//! - Day and combined chart rendering to standalone HTML
//! - The JSON run summary and the static dashboard page
//! - `run_report`, the sequential fetch → transform → render → summarize loop

pub mod config;
pub mod reporting;
pub mod runner;

pub use config::{ApiToken, ConfigError, ReportConfig, CONFIG_PATH_ENV, DEFAULT_TICKERS};
pub use reporting::{
    ChartArtifact, ChartKind, ChartWriter, DayRecord, RenderError, RunSummary, SummaryError,
    TickerSummary,
};
pub use runner::{build_provider, run_report, RunError, RunOutcome};
