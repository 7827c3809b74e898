//! Core data types for loudscan
//!
//! These types represent the domain model and flow through the pipeline.

use crate::error::LoudscanError;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

// =============================================================================
// Targets
// =============================================================================

/// One resolved audio file queued for analysis
///
/// Constructed by discovery, consumed exactly once by the scheduler.
#[derive(Debug, Clone)]
pub struct AnalysisTarget {
    pub path: PathBuf,
}

impl AnalysisTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Leaf file name used in output records
    pub fn name(&self) -> String {
        leaf_name(&self.path)
    }
}

// =============================================================================
// Raw analyzer output
// =============================================================================

/// Captured diagnostic text from one analyzer invocation
///
/// Owned by the task that produced it; consumed once by the parser.
#[derive(Debug)]
pub struct RawAnalysisOutput {
    /// Interleaved stdout/stderr text
    pub text: String,
    /// Whether the child process exited successfully
    pub success: bool,
}

// =============================================================================
// Metrics
// =============================================================================

/// Noise floor measurement
///
/// ffmpeg reports `-inf` for digitally silent floors. That is a legitimate
/// measurement, not an error, and must survive to the output record as the
/// literal string "-inf" rather than a numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseFloor {
    /// Measured floor in dB, rounded to 1 decimal
    Db(f64),
    /// The tool's negative-infinity token
    NegativeInfinity,
}

impl Serialize for NoiseFloor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NoiseFloor::Db(v) => serializer.serialize_f64(*v),
            NoiseFloor::NegativeInfinity => serializer.serialize_str("-inf"),
        }
    }
}

impl std::fmt::Display for NoiseFloor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseFloor::Db(v) => write!(f, "{:.1}", v),
            NoiseFloor::NegativeInfinity => write!(f, "-inf"),
        }
    }
}

/// Structured loudness/level metrics for one file
///
/// Every measurement is independently optional: a field stays `None` when no
/// diagnostic line matched its pattern. Unset is never coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoudnessMetrics {
    /// Leaf file name (not the full path)
    #[serde(rename = "Name")]
    pub name: String,
    /// Sample peak level in dB, rounded to 1 decimal
    #[serde(rename = "Peak")]
    pub peak_level_db: Option<f64>,
    /// RMS level in dB, rounded to 1 decimal
    #[serde(rename = "RMS")]
    pub rms_level_db: Option<f64>,
    /// Noise floor in dB, or the -inf sentinel
    #[serde(rename = "NoiseFloor")]
    pub noise_floor_db: Option<NoiseFloor>,
    /// True peak in dBFS, unrounded
    #[serde(rename = "TruePeak")]
    pub true_peak_dbfs: Option<f64>,
    /// Integrated loudness in LUFS, unrounded
    #[serde(rename = "IntegratedLoudness")]
    pub integrated_loudness_lufs: Option<f64>,
    /// Loudness range in LU, unrounded
    #[serde(rename = "LoudnessRange")]
    pub loudness_range_lu: Option<f64>,
    /// Loudness range lower bound in LUFS, unrounded
    #[serde(rename = "LRALow")]
    pub loudness_range_low_lufs: Option<f64>,
    /// Loudness range upper bound in LUFS, unrounded
    #[serde(rename = "LRAHigh")]
    pub loudness_range_high_lufs: Option<f64>,
}

impl LoudnessMetrics {
    /// Record with the given name and every measurement unset
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            peak_level_db: None,
            rms_level_db: None,
            noise_floor_db: None,
            true_peak_dbfs: None,
            integrated_loudness_lufs: None,
            loudness_range_lu: None,
            loudness_range_low_lufs: None,
            loudness_range_high_lufs: None,
        }
    }

    /// True when no pattern matched at all
    pub fn is_empty(&self) -> bool {
        self.peak_level_db.is_none()
            && self.rms_level_db.is_none()
            && self.noise_floor_db.is_none()
            && self.true_peak_dbfs.is_none()
            && self.integrated_loudness_lufs.is_none()
            && self.loudness_range_lu.is_none()
            && self.loudness_range_low_lufs.is_none()
            && self.loudness_range_high_lufs.is_none()
    }
}

// =============================================================================
// Per-file outcome
// =============================================================================

/// One outcome on the result stream: metrics or a per-file failure
#[derive(Debug)]
pub struct FileReport {
    /// Path of the analyzed file
    pub path: PathBuf,
    /// Metrics, or the invocation failure that prevented them
    pub result: Result<LoudnessMetrics, LoudscanError>,
}

impl FileReport {
    /// Leaf file name, also available for failed reports
    pub fn name(&self) -> String {
        leaf_name(&self.path)
    }
}

/// Leaf name of a path, falling back to the full path text
pub fn leaf_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
