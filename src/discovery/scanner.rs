//! File discovery and scanning
//!
//! Turns the CLI's files-and-directories input into the ordered list of
//! absolute targets the scheduler consumes. Explicit files must exist and
//! carry a supported extension; inside scanned directories, unsupported
//! files are silently skipped. Duplicates are legal and analyzed
//! independently.

use crate::error::{LoudscanError, Result};
use crate::types::AnalysisTarget;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extensions accepted when scanning directories
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["wav", "mp3", "flac", "ogg", "m4a", "aac", "aiff", "aif", "opus"];

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Resolve every input into analysis targets with absolute paths
///
/// `capacity_hint` pre-sizes the target list; it has no behavioral effect.
/// A missing or unreadable explicit input aborts discovery with an error
/// before anything is scheduled.
pub fn collect(inputs: &[PathBuf], recursive: bool, capacity_hint: usize) -> Result<Vec<AnalysisTarget>> {
    let mut targets = Vec::with_capacity(capacity_hint);

    for input in inputs {
        if input.is_file() {
            if !has_supported_extension(input) {
                return Err(LoudscanError::UnsupportedFormat {
                    path: input.clone(),
                    format: input
                        .extension()
                        .and_then(|e| e.to_str())
                        .unwrap_or("unknown")
                        .to_string(),
                });
            }
            targets.push(AnalysisTarget::new(absolute(input)?));
        } else if input.is_dir() {
            let walker = if recursive {
                WalkDir::new(input)
            } else {
                WalkDir::new(input).max_depth(1)
            };

            for entry in walker.into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                if path.is_file() && has_supported_extension(path) {
                    debug!("Discovered: {}", path.display());
                    targets.push(AnalysisTarget::new(absolute(path)?));
                }
            }
        } else {
            return Err(LoudscanError::FileNotFound(input.clone()));
        }
    }

    info!("Discovered {} audio files", targets.len());

    if targets.is_empty() {
        warn!("No supported audio files found in the given inputs");
    }

    Ok(targets)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .map_err(|_| LoudscanError::FileNotFound(path.to_path_buf()))
}
