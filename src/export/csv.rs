//! CSV export
//!
//! Flat one-row-per-file output with the same column names as the JSON
//! records. Unset metrics become empty cells, never zero.

use crate::error::{LoudscanError, Result};
use crate::export::OutputRecord;
use crate::types::{FileReport, NoiseFloor};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const HEADER: &str =
    "Name,Peak,RMS,NoiseFloor,TruePeak,IntegratedLoudness,LoudnessRange,LRALow,LRAHigh,Error";

/// Quote a field if it contains a delimiter, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn rounded_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_default()
}

fn raw_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn noise_floor_cell(value: Option<NoiseFloor>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn record_row(record: &OutputRecord) -> String {
    let m = &record.metrics;
    [
        csv_field(&m.name),
        rounded_cell(m.peak_level_db),
        rounded_cell(m.rms_level_db),
        noise_floor_cell(m.noise_floor_db),
        raw_cell(m.true_peak_dbfs),
        raw_cell(m.integrated_loudness_lufs),
        raw_cell(m.loudness_range_lu),
        raw_cell(m.loudness_range_low_lufs),
        raw_cell(m.loudness_range_high_lufs),
        csv_field(record.error.as_deref().unwrap_or_default()),
    ]
    .join(",")
}

/// Write all file reports to a CSV file
pub fn write_csv(reports: &[FileReport], output_path: &Path) -> Result<()> {
    let file = File::create(output_path).map_err(|e| LoudscanError::OutputError {
        path: output_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut writer = BufWriter::new(file);

    let write_err = |e: std::io::Error| LoudscanError::OutputError {
        path: output_path.to_path_buf(),
        reason: e.to_string(),
    };

    writeln!(writer, "{HEADER}").map_err(write_err)?;
    for report in reports {
        let record = OutputRecord::from(report);
        writeln!(writer, "{}", record_row(&record)).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;

    info!("Wrote {} records to {}", reports.len(), output_path.display());

    Ok(())
}
