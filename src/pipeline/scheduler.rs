//! Batch scheduling with bounded concurrency
//!
//! A fixed pool of worker threads pulls targets from a bounded job channel
//! and pushes one report per target onto an unbounded result channel, so the
//! caller can consume reports while the batch is still running. The result
//! channel must stay unbounded: workers could otherwise block on send while
//! the supervisor waits on join.
//!
//! Task isolation: workers share nothing but the analyzer (immutable) and
//! the channels; one file's failure is just one report on the stream.

use crate::analysis::Analyzer;
use crate::pipeline::env::NoColorGuard;
use crate::types::{AnalysisTarget, FileReport};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error};

/// Default cap on concurrent analyzer processes
pub const DEFAULT_JOBS: usize = 5;

/// How a batch is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One file at a time, strictly in input order
    Serial,
    /// At most `jobs` analyses in flight; completion order unspecified
    Parallel { jobs: usize },
}

/// Run the analyzer over every target, streaming one report per target
///
/// The returned channel closes only after every invocation has completed
/// and the color-suppression variable has been restored, so draining it to
/// the end is a completion barrier for the whole batch.
pub fn run_batch(
    targets: Vec<AnalysisTarget>,
    mode: ExecutionMode,
    analyzer: Arc<dyn Analyzer>,
) -> Receiver<FileReport> {
    let (report_tx, report_rx) = unbounded::<FileReport>();

    thread::spawn(move || {
        // Engaged before the first spawn, dropped after the last join.
        let guard = NoColorGuard::engage();

        match mode {
            ExecutionMode::Serial => run_serial(targets, &*analyzer, &report_tx),
            ExecutionMode::Parallel { jobs } => {
                run_parallel(targets, jobs.max(1), analyzer, &report_tx)
            }
        }

        drop(guard);
        // report_tx drops here, closing the stream after the env restore
    });

    report_rx
}

fn run_serial(targets: Vec<AnalysisTarget>, analyzer: &dyn Analyzer, report_tx: &Sender<FileReport>) {
    for target in targets {
        let result = analyzer.analyze(&target);
        if report_tx
            .send(FileReport {
                path: target.path,
                result,
            })
            .is_err()
        {
            // Receiver dropped, the caller stopped listening
            break;
        }
    }
}

fn run_parallel(
    targets: Vec<AnalysisTarget>,
    jobs: usize,
    analyzer: Arc<dyn Analyzer>,
    report_tx: &Sender<FileReport>,
) {
    let (job_tx, job_rx) = bounded::<AnalysisTarget>(jobs);

    let mut handles = Vec::with_capacity(jobs);
    for worker_id in 0..jobs {
        let job_rx = job_rx.clone();
        let report_tx = report_tx.clone();
        let analyzer = Arc::clone(&analyzer);
        handles.push(thread::spawn(move || {
            for target in job_rx {
                debug!("worker {} analyzing {}", worker_id, target.path.display());
                let result = analyzer.analyze(&target);
                if report_tx
                    .send(FileReport {
                        path: target.path,
                        result,
                    })
                    .is_err()
                {
                    break;
                }
            }
        }));
    }
    drop(job_rx);

    for target in targets {
        if job_tx.send(target).is_err() {
            break;
        }
    }
    drop(job_tx);

    for handle in handles {
        if handle.join().is_err() {
            error!("Analysis worker thread panicked");
        }
    }
}
