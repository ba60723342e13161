//! JSON run summary.
//!
//! Top-level keys are ticker symbols in report order; each maps to
//! `date_data` (ISO date → day record) and `combined_date_html_file`.
//! Artifact paths are stored relative to the docs directory.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tickerview_core::domain::DayMetrics;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write summary to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub html_file: String,
    pub opening_price: f64,
    pub closing_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

impl DayRecord {
    pub fn new(html_file: String, metrics: DayMetrics) -> Self {
        Self {
            html_file,
            opening_price: metrics.opening_price,
            closing_price: metrics.closing_price,
            min_price: metrics.min_price,
            max_price: metrics.max_price,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerSummary {
    /// Keyed by `YYYY-MM-DD`, which sorts chronologically.
    pub date_data: BTreeMap<String, DayRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_date_html_file: Option<String>,
}

/// Summary of a whole run, tickers kept in the order they were begun.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    tickers: Vec<(String, TickerSummary)>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or resume) the record for `symbol`.
    pub fn begin_ticker(&mut self, symbol: &str) -> &mut TickerSummary {
        let index = match self.tickers.iter().position(|(s, _)| s == symbol) {
            Some(index) => index,
            None => {
                self.tickers.push((symbol.to_string(), TickerSummary::default()));
                self.tickers.len() - 1
            }
        };
        &mut self.tickers[index].1
    }

    pub fn get(&self, symbol: &str) -> Option<&TickerSummary> {
        self.tickers
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, summary)| summary)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TickerSummary)> {
        self.tickers.iter().map(|(s, summary)| (s.as_str(), summary))
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Pretty JSON with 4-space indentation.
    pub fn to_json_string(&self) -> Result<String, SummaryError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn write(&self, path: &Path) -> Result<(), SummaryError> {
        let json = self.to_json_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SummaryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| SummaryError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Serialize for RunSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tickers.len()))?;
        for (symbol, summary) in &self.tickers {
            map.serialize_entry(symbol, summary)?;
        }
        map.end()
    }
}

/// `path` relative to `base`, `/`-separated, ignoring `.` components.
///
/// Falls back to the full path when the two share no root.
pub fn relative_path(path: &Path, base: &Path) -> String {
    fn parts(p: &Path) -> Vec<Component<'_>> {
        p.components().filter(|c| !matches!(c, Component::CurDir)).collect()
    }
    let path_parts = parts(path);
    let base_parts = parts(base);

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();
    let absolute = |c: &[Component<'_>]| {
        matches!(c.first(), Some(Component::RootDir | Component::Prefix(_)))
    };
    if common == 0 && (absolute(&path_parts) || absolute(&base_parts)) {
        return path.to_string_lossy().replace('\\', "/");
    }

    let mut out: Vec<String> = base_parts[common..].iter().map(|_| "..".to_string()).collect();
    out.extend(
        path_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    out.join("/")
}
