//! Stdout table rendering

use crate::export::OutputRecord;
use crate::types::FileReport;

const COLUMNS: &[&str] = &[
    "Name",
    "Peak",
    "RMS",
    "NoiseFloor",
    "TruePeak",
    "IntegratedLoudness",
    "LoudnessRange",
    "LRALow",
    "LRAHigh",
];

fn cells(record: &OutputRecord) -> Vec<String> {
    let m = &record.metrics;
    let rounded = |v: Option<f64>| v.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".into());
    let raw = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
    vec![
        m.name.clone(),
        rounded(m.peak_level_db),
        rounded(m.rms_level_db),
        m.noise_floor_db
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".into()),
        raw(m.true_peak_dbfs),
        raw(m.integrated_loudness_lufs),
        raw(m.loudness_range_lu),
        raw(m.loudness_range_low_lufs),
        raw(m.loudness_range_high_lufs),
    ]
}

/// Render all reports as an aligned text table
///
/// Failed files are listed below the table with their reasons.
pub fn render_table(reports: &[FileReport]) -> String {
    let records: Vec<OutputRecord> = reports.iter().map(OutputRecord::from).collect();
    let rows: Vec<Vec<String>> = records.iter().map(cells).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    out.push_str(&format_row(&header));
    out.push('\n');
    out.push_str(&format_row(&separator));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }

    let failures: Vec<&OutputRecord> = records.iter().filter(|r| r.error.is_some()).collect();
    if !failures.is_empty() {
        out.push('\n');
        for record in failures {
            if let Some(reason) = &record.error {
                out.push_str(&format!("! {}: {}\n", record.metrics.name, reason));
            }
        }
    }

    out
}
