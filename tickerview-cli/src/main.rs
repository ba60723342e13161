//! tickerview: fetch recent intraday prices and publish charts plus a JSON summary.
//!
//! There are no command-line flags. Settings come from defaults, optionally
//! overridden by the TOML file named in `TICKERVIEW_CONFIG`. The API token is
//! read from `TOKEN` (or the configured variable), which may live in `.env`.

use anyhow::{Context, Result};
use tickerview_runner::{build_provider, run_report, ReportConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tickerview=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();
    init_logging();

    let config = ReportConfig::from_env_or_default(|key| std::env::var(key).ok())
        .context("failed to load report configuration")?;
    let provider = build_provider(&config, |key| std::env::var(key).ok())
        .context("failed to set up the price provider")?;

    let today = chrono::Local::now().date_naive();
    let outcome = run_report(&config, &provider, today).context("report run failed")?;

    info!(
        tickers = outcome.summary.len(),
        charts = outcome.charts_written,
        summary = %outcome.summary_path.display(),
        dashboard = ?outcome.dashboard_path,
        "report complete"
    );
    Ok(())
}
