//! Batch scheduling and pipeline orchestration

pub mod env;
pub mod orchestrator;
pub mod scheduler;

pub use orchestrator::{run, PipelineResult};
pub use scheduler::{run_batch, ExecutionMode, DEFAULT_JOBS};
