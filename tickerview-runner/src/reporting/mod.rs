//! Report artifacts: charts, JSON summary and dashboard.

pub mod charts;
pub mod dashboard;
pub mod format;
pub mod summary;

pub use charts::{ChartArtifact, ChartKind, ChartWriter, RenderError};
pub use dashboard::{render_dashboard, write_dashboard, DayStats, TickerAverages};
pub use summary::{relative_path, DayRecord, RunSummary, SummaryError, TickerSummary};
