//! Dispatcher: input enumeration, task submission and shutdown
//!
//! Reads the input listing up front so a listing failure aborts the run
//! before any worker thread exists, then feeds one task per
//! non-directory entry into the shared queue in listing order.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::pool::{ErrorCollector, RunStats, WorkerPool};
use crate::task::Task;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::{debug, info};

/// Outcome of a completed run
#[derive(Debug)]
pub struct RunReport {
    /// Per-file errors in the order the collector received them
    pub errors: Vec<Error>,

    /// Files successfully relocated
    pub moved: usize,
}

impl RunReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All error messages, newline-joined, for the end-of-run report.
    pub fn joined_errors(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Enumerate the input directory and run every entry through the pool.
///
/// Fails with [`Error::Listing`] when the input directory cannot be
/// enumerated; per-file failures never fail the run and come back in
/// the report instead.
pub fn run(config: &Config) -> Result<RunReport> {
    // The whole listing is read before the pool starts.
    let entries = fs::read_dir(&config.input_dir).map_err(|e| Error::Listing {
        dir: config.input_dir.clone(),
        source: e,
    })?;
    let mut listing = Vec::new();
    for entry in entries {
        listing.push(entry.map_err(|e| Error::Listing {
            dir: config.input_dir.clone(),
            source: e,
        })?);
    }

    let out_root = std::path::absolute(&config.output_dir)
        .unwrap_or_else(|_| config.output_dir.clone());
    let workers = config.worker_count();
    info!(
        entries = listing.len(),
        workers,
        out = %out_root.display(),
        "Dispatching input listing"
    );

    let stats = Arc::new(RunStats::new());
    let collector = ErrorCollector::start();
    let pool = WorkerPool::spawn(
        workers,
        config.queue_capacity(),
        collector.sink(),
        Arc::clone(&stats),
    );

    for entry in listing {
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            debug!(entry = %entry.path().display(), "Skipping directory entry");
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        let source = std::path::absolute(&path).unwrap_or(path);
        pool.submit(Task::new(name, source, out_root.clone()));
    }

    // Queue closure, worker drain, then the collector's final report.
    pool.shutdown();
    let errors = collector.drain();

    info!("{}", stats.summary());

    Ok(RunReport {
        moved: stats.moved.load(Ordering::Relaxed),
        errors,
    })
}
