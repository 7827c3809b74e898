//! Runtime configuration settings

use crate::analysis::{DEFAULT_COMMAND, DEFAULT_WINDOW_SECS};
use crate::error::{LoudscanError, Result};
use crate::pipeline::scheduler::{ExecutionMode, DEFAULT_JOBS};
use std::path::PathBuf;

/// Runtime settings for the analysis pipeline
#[derive(Debug, Clone)]
pub struct Settings {
    /// Input files or directories
    pub inputs: Vec<PathBuf>,
    /// Level statistics window in seconds
    pub window_secs: f64,
    /// Maximum concurrent analyzer processes (ignored in serial mode)
    pub jobs: usize,
    /// Strictly sequential processing in input order
    pub serial: bool,
    /// Scan directories recursively
    pub recursive: bool,
    /// CSV output path
    pub csv_path: Option<PathBuf>,
    /// JSON output path
    pub json_path: Option<PathBuf>,
    /// Analyzer binary
    pub analyzer_command: String,
    /// Capacity hint for the target list, 0 for none
    pub capacity_hint: usize,
    /// Show progress bar
    pub show_progress: bool,
    /// Print the result table to stdout
    pub print_table: bool,
}

impl Settings {
    /// Create settings from CLI arguments, validating numeric bounds
    pub fn from_cli(cli: &super::cli::Cli) -> Result<Self> {
        if !cli.window.is_finite() || cli.window <= 0.0 {
            return Err(LoudscanError::ConfigError(format!(
                "window must be a positive number of seconds, got {}",
                cli.window
            )));
        }
        if cli.jobs == 0 {
            return Err(LoudscanError::ConfigError(
                "jobs must be at least 1".to_string(),
            ));
        }

        let file_export = cli.csv.is_some() || cli.json.is_some();

        Ok(Self {
            inputs: cli.inputs.clone(),
            window_secs: cli.window,
            jobs: cli.jobs,
            serial: cli.serial,
            recursive: cli.recursive,
            csv_path: cli.csv.clone(),
            json_path: cli.json.clone(),
            analyzer_command: cli.ffmpeg.clone(),
            capacity_hint: cli.reserve,
            show_progress: !cli.quiet,
            print_table: !cli.quiet && !file_export,
        })
    }

    /// Execution mode derived from the serial switch and job limit
    pub fn execution_mode(&self) -> ExecutionMode {
        if self.serial {
            ExecutionMode::Serial
        } else {
            ExecutionMode::Parallel { jobs: self.jobs }
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from(".")],
            window_secs: DEFAULT_WINDOW_SECS,
            jobs: DEFAULT_JOBS,
            serial: false,
            recursive: true,
            csv_path: None,
            json_path: None,
            analyzer_command: DEFAULT_COMMAND.to_string(),
            capacity_hint: 0,
            show_progress: true,
            print_table: true,
        }
    }
}
