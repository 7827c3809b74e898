//! loudscan - Batch Loudness Analysis for Audio Files
//!
//! A command-line utility that runs ffmpeg against each input file, extracts
//! level statistics (peak, RMS, noise floor) and EBU R128 loudness
//! measurements (integrated loudness, loudness range, true peak) from its
//! diagnostic output, and emits one structured record per file.
//!
//! # Architecture
//!
//! - `config`: CLI argument parsing and runtime settings
//! - `discovery`: file scanning and target resolution
//! - `analysis`: analyzer invocation and diagnostic-text parsing
//! - `pipeline`: bounded-concurrency scheduling and orchestration
//! - `export`: JSON, CSV, and table output
//!
//! # Example
//!
//! ```no_run
//! use loudscan::{config::Settings, pipeline};
//!
//! let settings = Settings::default();
//! let result = pipeline::run(&settings).expect("Analysis failed");
//! println!("Analyzed {} files", result.successful);
//! ```

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod types;

// Re-export key types at crate root
pub use error::{LoudscanError, Result};
pub use types::{AnalysisTarget, FileReport, LoudnessMetrics, NoiseFloor};
