//! Worker pool and error aggregation
//!
//! A fixed number of worker threads pull tasks from one shared bounded
//! channel and run the per-file pipeline: open, classify, extract the
//! capture time, relocate. Every stage failure becomes exactly one
//! error for that task, submitted to a collector thread that drains a
//! second channel into the final report.

use crate::classify::{Classification, classify};
use crate::error::{Error, Result};
use crate::relocate::relocate;
use crate::task::Task;
use crate::time::extract_time;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// Counters for one run
#[derive(Debug, Default)]
pub struct RunStats {
    pub moved: AtomicUsize,
    pub failed: AtomicUsize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> String {
        format!(
            "Moved: {}, Failed: {}",
            self.moved.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed)
        )
    }
}

/// Cloneable handle workers use to report a failed task.
///
/// Submission goes through an unbounded channel, so it never blocks a
/// worker no matter how far behind the collector is.
#[derive(Clone)]
pub struct ErrorSink {
    tx: Sender<Error>,
}

impl ErrorSink {
    /// Hand one terminal per-task error to the collector.
    pub fn submit(&self, err: Error) {
        // The receiver outlives every sink, so this cannot fail during
        // a run; a send after drain() has no one left to report to.
        let _ = self.tx.send(err);
    }
}

/// Collects errors from all workers on a dedicated thread.
pub struct ErrorCollector {
    tx: Sender<Error>,
    handle: JoinHandle<Vec<Error>>,
}

impl ErrorCollector {
    /// Start the collector thread.
    pub fn start() -> Self {
        let (tx, rx) = unbounded::<Error>();
        let handle = thread::spawn(move || rx.iter().collect());
        Self { tx, handle }
    }

    /// A submission handle for one worker.
    pub fn sink(&self) -> ErrorSink {
        ErrorSink {
            tx: self.tx.clone(),
        }
    }

    /// Close the submission side and return everything received, in
    /// arrival order. Call only after all workers have exited.
    pub fn drain(self) -> Vec<Error> {
        drop(self.tx);
        self.handle.join().expect("error collector thread panicked")
    }
}

/// Fixed pool of worker threads over a shared task channel
pub struct WorkerPool {
    tx: Sender<Task>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `workers` threads consuming from a bounded channel of the
    /// given capacity.
    pub fn spawn(
        workers: usize,
        capacity: usize,
        errors: ErrorSink,
        stats: Arc<RunStats>,
    ) -> Self {
        let (tx, rx) = bounded::<Task>(capacity);

        let handles = (0..workers)
            .map(|id| {
                let rx = rx.clone();
                let errors = errors.clone();
                let stats = Arc::clone(&stats);
                thread::Builder::new()
                    .name(format!("worker-{id}"))
                    .spawn(move || run_worker(rx, errors, stats))
                    .expect("failed to spawn worker thread")
            })
            .collect();

        Self { tx, handles }
    }

    /// Push one task into the queue, blocking while it is full.
    pub fn submit(&self, task: Task) {
        // Workers hold the receiver for the whole run, so the channel
        // cannot disconnect while the pool is alive.
        let _ = self.tx.send(task);
    }

    /// Close the queue and wait for every worker to drain it and exit.
    pub fn shutdown(self) {
        drop(self.tx);
        for handle in self.handles {
            let _ = handle.join();
        }
    }
}

/// Worker loop: one task at a time until the queue closes.
fn run_worker(rx: Receiver<Task>, errors: ErrorSink, stats: Arc<RunStats>) {
    for task in rx.iter() {
        match process_task(&task) {
            Ok(dest) => {
                debug!(name = %task.name, dest = %dest.display(), "Task complete");
                stats.moved.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error!(name = %task.name, error = %e, "Task failed");
                stats.failed.fetch_add(1, Ordering::Relaxed);
                errors.submit(e);
            }
        }
    }
}

/// Run the full pipeline for one task.
///
/// The source file handle lives for exactly this call; it is released
/// on every exit path before the worker takes the next task.
fn process_task(task: &Task) -> Result<PathBuf> {
    let file = File::open(&task.source).map_err(|e| Error::Open {
        name: task.name.clone(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);

    match classify(&task.name, &mut reader)? {
        Classification::Eligible => {}
        Classification::Ineligible { detected } => {
            // A skip, not a systemic failure; still surfaced in the
            // final report with the detected type as the reason.
            return Err(Error::Unsupported {
                name: task.name.clone(),
                detected,
            });
        }
    }

    let timestamp = extract_time(&task.name, &mut reader)?;

    relocate(task, &timestamp)
}
