//! Unified error types for loudscan
//!
//! Error strategy:
//! - Per-file errors (invocation): recoverable, reported on the result
//!   stream, siblings keep running
//! - System errors (missing analyzer, output, config): fatal, abort batch

use std::path::PathBuf;
use thiserror::Error;

/// Audio formats accepted by directory scanning, for error messages
pub const SUPPORTED_FORMATS: &str = "WAV, MP3, FLAC, OGG, M4A, AAC, AIFF, OPUS";

/// Top-level error type for loudscan operations
#[derive(Debug, Error)]
pub enum LoudscanError {
    // =========================================================================
    // Recoverable errors - one failure report, continue batch
    // =========================================================================
    #[error("Failed to invoke analyzer for '{path}': {reason}")]
    Invocation { path: PathBuf, reason: String },

    #[error("File not found: '{0}'\n  Tip: Check the path exists and is accessible")]
    FileNotFound(PathBuf),

    #[error("Unsupported audio format for '{path}': {format}\n  Supported formats: {SUPPORTED_FORMATS}")]
    UnsupportedFormat { path: PathBuf, format: String },

    // =========================================================================
    // Fatal errors - abort entire batch
    // =========================================================================
    #[error("Analyzer '{tool}' not found on PATH: {reason}\n  Tip: Install ffmpeg or point --ffmpeg at the binary")]
    ToolNotFound { tool: String, reason: String },

    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    OutputError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for loudscan operations
pub type Result<T> = std::result::Result<T, LoudscanError>;

impl LoudscanError {
    /// Returns true if this error is per-file (report it, continue batch)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LoudscanError::Invocation { .. }
                | LoudscanError::FileNotFound(_)
                | LoudscanError::UnsupportedFormat { .. }
        )
    }

    /// Create an invocation error with context
    pub fn invocation(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        LoudscanError::Invocation {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
