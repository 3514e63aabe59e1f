//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use dnsdb::Timestamp;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

/// Render an optional timestamp; absent times are empty cells.
pub fn time_cell(ts: Option<Timestamp>) -> String {
    ts.map(|t| t.to_string()).unwrap_or_default()
}

/// Write CSV rows (header first) to `out`.
pub fn write_csv<W, I, R>(out: W, header: &[&str], rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
