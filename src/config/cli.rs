//! CLI argument parsing and configuration

use clap::Parser;
use std::path::PathBuf;

/// loudscan - batch loudness analysis for audio files
///
/// Runs ffmpeg against every input file, extracts peak/RMS/noise-floor
/// level statistics and EBU R128 loudness measurements from its diagnostic
/// output, and emits one record per file as a table, CSV, or JSON.
#[derive(Parser, Debug)]
#[command(name = "loudscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Input files or directories
    #[arg(value_name = "PATH", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Level statistics window in seconds
    #[arg(short, long, value_name = "SECS", default_value_t = 1.0)]
    pub window: f64,

    /// Maximum concurrent analyzer processes
    #[arg(short = 'j', long, value_name = "N", default_value_t = 5)]
    pub jobs: usize,

    /// Process files one at a time, in input order
    #[arg(long, default_value = "false")]
    pub serial: bool,

    /// Scan subdirectories recursively
    #[arg(short, long, default_value = "true")]
    pub recursive: bool,

    /// Write results to a CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Write results to a JSON file
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Analyzer binary to invoke
    #[arg(long, value_name = "BIN", default_value = "ffmpeg")]
    pub ffmpeg: String,

    /// Pre-allocate the target list for this many entries (tuning only)
    #[arg(long, value_name = "N", default_value_t = 0, hide = true)]
    pub reserve: usize,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress bars and the table)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}
