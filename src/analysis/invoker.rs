//! External analyzer invocation
//!
//! One ffmpeg child process per file. A single invocation carries both
//! filters: astats for windowed level statistics (overall aggregate only)
//! and ebur128 for integrated loudness, loudness range, and true peak.
//! Decoded audio is discarded via the null muxer; the report lands on the
//! diagnostic stream.

use crate::analysis::parser;
use crate::analysis::traits::Analyzer;
use crate::error::{LoudscanError, Result};
use crate::types::{AnalysisTarget, LoudnessMetrics, RawAnalysisOutput};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Default analyzer binary
pub const DEFAULT_COMMAND: &str = "ffmpeg";

/// Default astats measurement window in seconds
pub const DEFAULT_WINDOW_SECS: f64 = 1.0;

/// ffmpeg-backed analyzer
///
/// The window size is captured by value at construction and shared
/// immutably by every concurrent task.
#[derive(Debug, Clone)]
pub struct FfmpegAnalyzer {
    command: String,
    window_secs: f64,
}

impl FfmpegAnalyzer {
    pub fn new(window_secs: f64) -> Self {
        Self::with_command(DEFAULT_COMMAND, window_secs)
    }

    /// Use an alternate binary (tests point this at a stub executable)
    pub fn with_command(command: impl Into<String>, window_secs: f64) -> Self {
        Self {
            command: command.into(),
            window_secs,
        }
    }

    /// Check that the analyzer binary can be started at all
    ///
    /// Run once before the batch; a missing binary is fatal and must not
    /// surface as N identical per-file failures.
    pub fn probe(command: &str) -> Result<()> {
        Command::new(command)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| LoudscanError::ToolNotFound {
                tool: command.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    /// Combined filter graph for one invocation
    fn filter_graph(&self) -> String {
        format!(
            "astats=metadata=0:reset=0:length={}:measure_perchannel=none:\
             measure_overall=Peak_level+RMS_level+Noise_floor,\
             ebur128=dualmono=true:framelog=quiet:peak=true",
            self.window_secs
        )
    }

    /// Run the analyzer against one file and capture its diagnostic text
    ///
    /// The text is returned regardless of exit code: ffmpeg writes filter
    /// reports incrementally during decode, so a late failure can still
    /// leave complete metric lines behind.
    pub fn invoke(&self, target: &AnalysisTarget) -> Result<RawAnalysisOutput> {
        debug!("Invoking {} on {}", self.command, target.path.display());

        let output = Command::new(&self.command)
            .arg("-hide_banner")
            .arg("-nostats")
            .arg("-nostdin")
            .arg("-i")
            .arg(&target.path)
            .arg("-af")
            .arg(self.filter_graph())
            .arg("-f")
            .arg("null")
            .arg("-")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| LoudscanError::invocation(&target.path, e.to_string()))?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(RawAnalysisOutput {
            text,
            success: output.status.success(),
        })
    }
}

impl Analyzer for FfmpegAnalyzer {
    fn analyze(&self, target: &AnalysisTarget) -> Result<LoudnessMetrics> {
        let raw = self.invoke(target)?;
        let metrics = parser::parse_diagnostics(&target.name(), &raw.text);

        // A failed exit that produced no metric line at all is an invocation
        // failure, distinct from a successful-but-partial parse.
        if !raw.success && metrics.is_empty() {
            warn!("Analyzer produced no metrics for {}", target.path.display());
            return Err(LoudscanError::invocation(
                &target.path,
                "analyzer exited with an error and produced no metric lines",
            ));
        }

        Ok(metrics)
    }

    fn name(&self) -> &'static str {
        "ffmpeg"
    }
}
