//! JSON export for interoperability with other tools

use crate::error::{LoudscanError, Result};
use crate::export::OutputRecord;
use crate::types::FileReport;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// JSON output schema version
const SCHEMA_VERSION: &str = "1.0";

/// Top-level JSON output structure
#[derive(Debug, Serialize)]
struct ScanJson {
    /// Schema version for forward compatibility
    version: String,
    /// Export metadata
    metadata: ExportMetadata,
    /// One record per analyzed file
    files: Vec<OutputRecord>,
}

#[derive(Debug, Serialize)]
struct ExportMetadata {
    /// loudscan version that generated this file
    generator_version: String,
    /// Timestamp of export
    exported_at: String,
    /// Number of records
    file_count: usize,
}

/// Write all file reports to a JSON file
///
/// Uses atomic write pattern: writes to a temp file first, then renames,
/// so an interrupted write never corrupts an existing export.
pub fn write_json(reports: &[FileReport], output_path: &Path) -> Result<()> {
    let temp_path = output_path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| LoudscanError::OutputError {
        path: output_path.to_path_buf(),
        reason: format!("Failed to create temp file: {}", e),
    })?;
    let writer = BufWriter::new(file);

    let output = ScanJson {
        version: SCHEMA_VERSION.to_string(),
        metadata: ExportMetadata {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            file_count: reports.len(),
        },
        files: reports.iter().map(OutputRecord::from).collect(),
    };

    serde_json::to_writer_pretty(writer, &output).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        LoudscanError::OutputError {
            path: output_path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    std::fs::rename(&temp_path, output_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        LoudscanError::OutputError {
            path: output_path.to_path_buf(),
            reason: format!("Failed to finalize file: {}", e),
        }
    })?;

    info!("Wrote {} records to {}", reports.len(), output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LoudnessMetrics, NoiseFloor};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn written_json_carries_the_output_contract_fields() {
        let mut metrics = LoudnessMetrics::named("track.wav");
        metrics.peak_level_db = Some(-3.1);
        metrics.noise_floor_db = Some(NoiseFloor::NegativeInfinity);
        let reports = vec![FileReport {
            path: PathBuf::from("/music/track.wav"),
            result: Ok(metrics),
        }];

        let dir = TempDir::new().unwrap();
        let out = dir.path().join("scan.json");
        write_json(&reports, &out).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["metadata"]["file_count"], 1);
        let record = &json["files"][0];
        assert_eq!(record["Name"], "track.wav");
        assert_eq!(record["Peak"], serde_json::json!(-3.1));
        assert_eq!(record["NoiseFloor"], "-inf");
        assert_eq!(record["RMS"], serde_json::Value::Null);
        assert!(record.get("Error").is_none());
    }
}
