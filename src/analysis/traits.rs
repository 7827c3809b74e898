//! Analysis trait abstraction
//!
//! The scheduler only knows this interface; the production backend shells
//! out to ffmpeg, tests substitute stubs.

use crate::error::Result;
use crate::types::{AnalysisTarget, LoudnessMetrics};

/// Per-file analysis backend
pub trait Analyzer: Send + Sync {
    /// Analyze one file and return its metrics record
    ///
    /// A partial record (some fields unset) is a success; `Err` means the
    /// invocation itself failed.
    fn analyze(&self, target: &AnalysisTarget) -> Result<LoudnessMetrics>;

    /// Get the name of this analyzer (for logging)
    fn name(&self) -> &'static str;
}
