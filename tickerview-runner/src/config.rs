//! Report configuration.
//!
//! A `ReportConfig` is built once at startup (defaults, optionally overlaid
//! by a TOML file) and then only borrowed. The API token is resolved
//! separately so that a missing token fails before any network activity.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tickerview_core::data::{DEFAULT_ENDPOINT_TEMPLATE, DEFAULT_RESAMPLE_FREQ};

/// Symbols reported when no config file overrides them.
pub const DEFAULT_TICKERS: [&str; 18] = [
    "AAPL", "AMZN", "CMG", "COF", "CVS", "FB", "GOOGL", "NFLX", "NKE", "NOC", "PG", "SBUX",
    "SPOT", "TGT", "TSLA", "ULTA", "UNH", "XOM",
];

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "TICKERVIEW_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no authentication token specified (set {0})")]
    MissingToken(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Immutable settings for one report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Symbols in report order.
    pub tickers: Vec<String>,
    /// Business days before today where the request window starts.
    pub lookback_business_days: u32,
    /// Endpoint with `{ticker_symbol}`, `{start_date}`, `{end_date}`, `{resample_freq}`.
    pub endpoint_template: String,
    pub resample_freq: String,
    /// IANA name of the display timezone.
    pub timezone: String,
    /// Root that artifact paths in the summary are relative to.
    pub docs_dir: PathBuf,
    pub output_dir: PathBuf,
    pub summary_file_name: String,
    /// Environment variable holding the API token.
    pub token_env_var: String,
    pub chart_width: u32,
    pub chart_height: u32,
    pub write_dashboard: bool,
    pub dashboard_file_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect(),
            lookback_business_days: 5,
            endpoint_template: DEFAULT_ENDPOINT_TEMPLATE.to_string(),
            resample_freq: DEFAULT_RESAMPLE_FREQ.to_string(),
            timezone: "US/Central".to_string(),
            docs_dir: PathBuf::from("./docs"),
            output_dir: PathBuf::from("./docs/output"),
            summary_file_name: "output_summary.json".to_string(),
            token_env_var: "TOKEN".to_string(),
            chart_width: 400,
            chart_height: 250,
            write_dashboard: true,
            dashboard_file_name: "dashboard.html".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load a config file. Unspecified keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `TICKERVIEW_CONFIG`, or use defaults.
    pub fn from_env_or_default(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        match lookup(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::Invalid("ticker list is empty".into()));
        }
        let mut seen = HashSet::new();
        for ticker in &self.tickers {
            if ticker.trim().is_empty() {
                return Err(ConfigError::Invalid("blank ticker symbol".into()));
            }
            if !seen.insert(ticker.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate ticker '{ticker}'")));
            }
        }
        if !self.endpoint_template.contains("{ticker_symbol}") {
            return Err(ConfigError::Invalid(
                "endpoint_template must contain {ticker_symbol}".into(),
            ));
        }
        self.tz()?;
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ConfigError::Invalid("chart dimensions must be non-zero".into()));
        }
        if self.summary_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("summary_file_name is empty".into()));
        }
        Ok(())
    }

    /// Parsed display timezone.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| ConfigError::Invalid(format!("timezone '{}': {e}", self.timezone)))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(&self.summary_file_name)
    }

    pub fn dashboard_path(&self) -> PathBuf {
        self.docs_dir.join(&self.dashboard_file_name)
    }

    /// Read the API token through `lookup` (normally `std::env::var`).
    ///
    /// Blank values count as missing.
    pub fn resolve_token(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ApiToken, ConfigError> {
        lookup(&self.token_env_var)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(ApiToken)
            .ok_or_else(|| ConfigError::MissingToken(self.token_env_var.clone()))
    }
}

/// API token; never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}
