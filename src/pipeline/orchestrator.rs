//! Pipeline orchestration
//!
//! Coordinates analyzer probing, file discovery, the scheduled batch, and
//! export. Reports are drained from the scheduler's stream as they arrive,
//! so progress reflects completions, not queue position.

use crate::analysis::{Analyzer, FfmpegAnalyzer};
use crate::config::Settings;
use crate::discovery;
use crate::error::Result;
use crate::export;
use crate::pipeline::scheduler;
use crate::types::FileReport;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Pipeline result summary
#[derive(Debug)]
pub struct PipelineResult {
    pub total_files: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Run the full analysis pipeline
pub fn run(settings: &Settings) -> Result<PipelineResult> {
    let pipeline_start = Instant::now();

    // Phase 1: setup. A missing analyzer is fatal before any file runs.
    FfmpegAnalyzer::probe(&settings.analyzer_command)?;
    debug!("Analyzer '{}' is available", settings.analyzer_command);

    // Phase 2: discovery
    info!("Scanning for audio files...");
    let targets = discovery::collect(&settings.inputs, settings.recursive, settings.capacity_hint)?;

    if targets.is_empty() {
        return Ok(PipelineResult {
            total_files: 0,
            successful: 0,
            failed: 0,
        });
    }

    let total_files = targets.len();
    info!("Analyzing {} files", total_files);

    // Phase 3: scheduled analysis. The analyzer captures the window size by
    // value here; every worker shares the same immutable configuration.
    let analyzer: Arc<dyn Analyzer> = Arc::new(FfmpegAnalyzer::with_command(
        settings.analyzer_command.clone(),
        settings.window_secs,
    ));
    let report_rx = scheduler::run_batch(targets, settings.execution_mode(), analyzer);

    let progress_bar = if settings.show_progress {
        let pb = ProgressBar::new(total_files as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut reports: Vec<FileReport> = Vec::with_capacity(total_files);
    let mut successful = 0usize;
    let mut failed = 0usize;

    for report in report_rx {
        match &report.result {
            Ok(metrics) => {
                debug!("Analyzed {}: {:?}", report.path.display(), metrics);
                successful += 1;
            }
            Err(e) => {
                warn!("Failed {}: {}", report.path.display(), e);
                failed += 1;
            }
        }
        if let Some(ref pb) = progress_bar {
            pb.inc(1);
            pb.set_message(report.name());
        }
        reports.push(report);
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Analysis complete");
    }

    let elapsed = pipeline_start.elapsed();
    info!(
        "Analyzed {} files in {:.2}s ({:.1} files/sec)",
        total_files,
        elapsed.as_secs_f64(),
        total_files as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    // Phase 4: export
    if let Some(csv_path) = &settings.csv_path {
        export::write_csv(&reports, csv_path)?;
    }
    if let Some(json_path) = &settings.json_path {
        export::write_json(&reports, json_path)?;
    }
    if settings.print_table {
        print!("{}", export::render_table(&reports));
    }

    Ok(PipelineResult {
        total_files,
        successful,
        failed,
    })
}
