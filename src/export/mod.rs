//! Result export: JSON, CSV, and stdout table

pub mod csv;
pub mod json;
pub mod table;

use crate::types::{FileReport, LoudnessMetrics};
use serde::Serialize;

pub use csv::write_csv;
pub use json::write_json;
pub use table::render_table;

/// One exported record per analyzed file
///
/// Failures keep the record shape: leaf name, every metric null, and the
/// failure reason under `Error`.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    #[serde(flatten)]
    pub metrics: LoudnessMetrics,
    #[serde(rename = "Error", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&FileReport> for OutputRecord {
    fn from(report: &FileReport) -> Self {
        match &report.result {
            Ok(metrics) => Self {
                metrics: metrics.clone(),
                error: None,
            },
            Err(e) => Self {
                metrics: LoudnessMetrics::named(report.name()),
                error: Some(e.to_string()),
            },
        }
    }
}
