//! Audio analysis modules
//!
//! The trait abstraction allows swapping the analyzer backend without
//! changing scheduler code; production uses ffmpeg via `FfmpegAnalyzer`.

pub mod invoker;
pub mod parser;
pub mod traits;

pub use invoker::{FfmpegAnalyzer, DEFAULT_COMMAND, DEFAULT_WINDOW_SECS};
pub use parser::parse_diagnostics;
pub use traits::Analyzer;
