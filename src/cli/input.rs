//! Return-series file loading
//!
//! Accepts a JSON array of numbers or of `{date, value}` objects, or a text
//! file with one `value` or `date,value` per line. Blank lines and `#`
//! comments are ignored and a non-numeric first line is read as a header.

use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

use crate::validation::DatedReturn;

/// A loaded return series
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnSeries {
    Plain(Vec<f64>),
    Dated(Vec<DatedReturn>),
}

impl ReturnSeries {
    /// Return values in file order
    pub fn values(&self) -> Vec<f64> {
        match self {
            ReturnSeries::Plain(values) => values.clone(),
            ReturnSeries::Dated(returns) => returns.iter().map(|r| r.value).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReturnSeries::Plain(values) => values.len(),
            ReturnSeries::Dated(returns) => returns.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSeries {
    Plain(Vec<f64>),
    Dated(Vec<DatedReturn>),
}

/// Read a return series from disk
pub fn load_returns(path: impl AsRef<Path>) -> anyhow::Result<ReturnSeries> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read returns from {}", path.display()))?;
    let series = parse_returns(&content)
        .with_context(|| format!("Failed to parse returns in {}", path.display()))?;
    tracing::info!(path = %path.display(), observations = series.len(), "Loaded return series");
    Ok(series)
}

/// Parse a return series from file contents
pub fn parse_returns(content: &str) -> anyhow::Result<ReturnSeries> {
    if content.trim_start().starts_with('[') {
        let series: JsonSeries = serde_json::from_str(content).context("Invalid JSON return series")?;
        return Ok(match series {
            JsonSeries::Plain(values) => ReturnSeries::Plain(values),
            JsonSeries::Dated(returns) => ReturnSeries::Dated(returns),
        });
    }

    let mut plain = Vec::new();
    let mut dated = Vec::new();
    let mut first = true;

    for (line_no, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let is_first = std::mem::replace(&mut first, false);

        match parse_line(line) {
            Some(Line::Value(value)) => plain.push(value),
            Some(Line::Dated(ret)) => dated.push(ret),
            None if is_first => continue,
            None => bail!("Line {}: cannot parse {:?}", line_no + 1, line),
        }
    }

    match (plain.is_empty(), dated.is_empty()) {
        (_, true) => Ok(ReturnSeries::Plain(plain)),
        (true, false) => Ok(ReturnSeries::Dated(dated)),
        (false, false) => bail!("Mixed dated and undated lines"),
    }
}

enum Line {
    Value(f64),
    Dated(DatedReturn),
}

fn parse_line(line: &str) -> Option<Line> {
    match line.split_once(',') {
        Some((date, value)) => {
            let date = date.trim().parse::<NaiveDate>().ok()?;
            let value = value.trim().parse::<f64>().ok()?;
            Some(Line::Dated(DatedReturn { date, value }))
        }
        None => line.parse::<f64>().ok().map(Line::Value),
    }
}

/// Write a dated return series as JSON
pub fn write_returns(path: impl AsRef<Path>, returns: &[DatedReturn]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(returns)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write returns to {}", path.display()))?;
    Ok(())
}
